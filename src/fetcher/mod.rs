pub mod http_fetcher;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::NewsItem;

pub use http_fetcher::HttpFetcher;

/// Why a retrieval produced no usable items.
///
/// Every variant is recoverable: the store keeps its last good items and
/// the next poll tick tries again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Server responded with HTTP {status}")]
    Http { status: u16 },

    #[error("Could not reach news service: {0}")]
    Transport(String),

    #[error("Response is not valid JSON: {0}")]
    Decode(String),

    #[error("Unexpected response shape: {0}")]
    Shape(#[from] ShapeError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("expected a list of news items")]
    NotAnArray,

    #[error("expected a list of news items (upstream reported: {0})")]
    UpstreamError(String),

    #[error("news list is empty")]
    Empty,

    #[error("item {index} is invalid: {reason}")]
    InvalidItem { index: usize, reason: String },
}

#[async_trait]
pub trait Fetcher {
    /// Retrieve and normalize the current feed.
    async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError>;
}
