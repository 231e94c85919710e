use tracing::info;

use crate::app::{AppContext, NewsTickerError, Result};
use crate::domain::FeedState;
use crate::poller::format_interval;
use crate::store::UpdateOutcome;
use crate::view::{FeedBody, FeedView};

/// Fetch the feed once and print it.
pub async fn fetch_once(ctx: &AppContext, view: &FeedView, json: bool) -> Result<()> {
    let outcome = ctx.store.update().await;
    let state = ctx.store.snapshot();

    if outcome != UpdateOutcome::Updated {
        let reason = state
            .error
            .unwrap_or_else(|| format!("update ended as {:?}", outcome));
        return Err(NewsTickerError::Feed(reason));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&state.items)?);
    } else {
        print!("{}", render_text(view, &state));
    }
    ctx.store.dispose();
    Ok(())
}

/// Poll the feed and print every state change until Ctrl-C.
pub async fn watch(ctx: &AppContext, view: &FeedView) -> Result<()> {
    let mut feed_rx = ctx.store.subscribe();
    let mut poller = ctx.start_polling();
    println!(
        "Watching {} every {} (Ctrl-C to stop)",
        ctx.endpoint,
        format_interval(poller.interval())
    );

    loop {
        tokio::select! {
            changed = feed_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = feed_rx.borrow_and_update().clone();
                // Only settled states are worth printing.
                if !state.refreshing {
                    print!("{}", render_text(view, &state));
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                break;
            }
        }
    }

    poller.stop();
    ctx.store.dispose();
    Ok(())
}

/// Plain-text rendering of a state snapshot.
pub fn render_text(view: &FeedView, state: &FeedState) -> String {
    let feed = view.project(state);
    let mut out = String::new();

    if let Some(updated) = &feed.header.last_updated {
        out.push_str(&format!("== {} ==\n", updated));
    }
    if let Some(error) = &feed.error {
        out.push_str(&format!("! {}\n", error));
    }

    match &feed.body {
        FeedBody::Loading(text) => {
            out.push_str(text);
            out.push('\n');
        }
        FeedBody::Items(items) => {
            for item in items {
                out.push_str(&format!("{:>2}. {}", item.number, item.title));
                for badge in &item.badges {
                    out.push(' ');
                    out.push_str(badge.text());
                }
                out.push('\n');
                let meta = item.meta.to_text();
                if !meta.is_empty() {
                    out.push_str(&format!("    {}\n", meta));
                }
            }
        }
    }
    out
}
