pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "newsticker")]
#[command(about = "A live technology news ticker for the terminal", long_about = None)]
pub struct Cli {
    /// News endpoint to poll (overrides the config file)
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Poll interval, e.g. "30s", "1m", "500ms" (overrides the config file)
    #[arg(short, long, global = true)]
    pub interval: Option<String>,

    /// Path to an alternative config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the live TUI (default)
    Tui,
    /// Fetch the feed once and print it
    Fetch {
        /// Print the normalized items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Poll the feed and print every change until interrupted
    Watch,
}
