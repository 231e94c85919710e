use chrono::{DateTime, Local};

use super::NewsItem;

/// A transition applied to [`FeedState`].
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    FetchStarted,
    FetchSucceeded {
        items: Vec<NewsItem>,
        at: DateTime<Local>,
    },
    FetchFailed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    pub items: Vec<NewsItem>,
    pub last_updated: Option<DateTime<Local>>,
    /// Only true until the first fetch resolves.
    pub loading: bool,
    /// True while a fetch is in flight; gates overlapping fetches.
    pub refreshing: bool,
    pub error: Option<String>,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            last_updated: None,
            loading: true,
            refreshing: false,
            error: None,
        }
    }

    /// Apply an event, returning whether anything changed.
    ///
    /// `FetchStarted` while already refreshing is rejected. A successful
    /// fetch with no items is treated as a failure so the displayed items
    /// are never replaced by an empty list.
    pub fn apply(&mut self, event: FeedEvent) -> bool {
        match event {
            FeedEvent::FetchStarted => {
                if self.refreshing {
                    return false;
                }
                self.refreshing = true;
            }
            FeedEvent::FetchSucceeded { items, at } => {
                if items.is_empty() {
                    return self.apply(FeedEvent::FetchFailed {
                        error: "Feed response contained no items".to_string(),
                    });
                }
                self.items = items;
                self.last_updated = Some(at);
                self.error = None;
                self.loading = false;
                self.refreshing = false;
            }
            FeedEvent::FetchFailed { error } => {
                self.error = Some(error);
                self.loading = false;
                self.refreshing = false;
            }
        }
        true
    }

    pub fn is_initial_load(&self) -> bool {
        self.loading
    }

    /// Local wall-clock time of the last successful refresh.
    pub fn last_updated_label(&self) -> Option<String> {
        self.last_updated
            .map(|at| at.format("%H:%M:%S").to_string())
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}
