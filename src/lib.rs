//! # Newsticker
//!
//! A live technology news ticker for the terminal.
//!
//! Newsticker polls a JSON news endpoint on a fixed interval, keeps the
//! last good headlines on screen when a refresh fails, and lets you open
//! an item's link in the browser or read its details in a popup.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the live TUI against the default endpoint
//! newsticker
//!
//! # Fetch once and print
//! newsticker fetch --endpoint http://localhost:5000/api/news
//!
//! # Print every change, polling every 5 seconds
//! newsticker watch --interval 5s
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`cli`]: Command-line interface definitions
//! - [`domain`]: News items, categories and the feed state machine
//! - [`fetcher`]: HTTP fetching of the news endpoint
//! - [`normalizer`]: JSON payload validation and normalization
//! - [`store`]: Live feed state holder
//! - [`poller`]: Interval scheduling
//! - [`view`]: Presentation projection and item activation
//! - [`tui`]: Terminal user interface

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetcher,
/// the feed store and the navigation port.
pub mod app;

/// Command-line interface using clap.
///
/// - `tui` - Launch the live TUI (default)
/// - `fetch [--json]` - Fetch once and print
/// - `watch` - Print every change until interrupted
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/newsticker/config.toml`, supporting:
/// - Endpoint, poll interval and request timeout
/// - Header, badge and popup display options
/// - Custom colors (named or hex)
/// - Custom keybindings
pub mod config;

/// Core domain models.
///
/// - [`NewsItem`](domain::NewsItem): One normalized headline
/// - [`FeedState`](domain::FeedState): Items plus loading/refreshing/error flags
/// - [`Category`](domain::Category): Category labels and their glyphs
pub mod domain;

/// HTTP fetching of the news endpoint.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for one feed fetch
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Opening links in the system browser.
pub mod navigation;

/// Converts raw response bodies into validated [`NewsItem`](domain::NewsItem)s.
pub mod normalizer;

/// Fixed-interval scheduling of feed refreshes.
pub mod poller;

/// The live feed store.
///
/// [`FeedStore`](store::FeedStore) owns the [`FeedState`](domain::FeedState)
/// and is the only place that changes it.
pub mod store;

/// Terminal user interface built with ratatui.
///
/// Keybindings: j/k navigate, Enter/o opens, Esc/x closes the popup,
/// r refreshes, q quits. Mouse clicks select and open items.
pub mod tui;

/// Render-ready projection of the feed state.
pub mod view;
