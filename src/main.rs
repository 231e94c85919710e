use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsticker::app::AppContext;
use newsticker::cli::{commands, Cli, Commands};
use newsticker::config::Config;
use newsticker::view::FeedView;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with TUI or printed output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.feed.endpoint = endpoint;
    }
    if let Some(interval) = cli.interval {
        config.feed.poll_interval = interval;
    }

    let ctx = AppContext::new(&config)?;
    let view = FeedView::new(config.display.clone());

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            newsticker::tui::run(Arc::new(ctx), Arc::new(config)).await?;
        }
        Commands::Fetch { json } => {
            commands::fetch_once(&ctx, &view, json).await?;
        }
        Commands::Watch => {
            commands::watch(&ctx, &view).await?;
        }
    }

    Ok(())
}
