//! Live feed state and its single update path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Local;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::{FeedEvent, FeedState};
use crate::fetcher::Fetcher;

/// What a call to [`FeedStore::update`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The fetch succeeded and the items were replaced.
    Updated,
    /// The fetch failed; items were kept and the error recorded.
    Failed,
    /// Another fetch was already in flight.
    Skipped,
    /// The store was disposed before the call.
    Disposed,
    /// The store was disposed while the fetch was in flight.
    Discarded,
}

pub struct FeedStore {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    state: watch::Sender<FeedState>,
    disposed: AtomicBool,
}

impl FeedStore {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let (state, _) = watch::channel(FeedState::new());
        Self {
            fetcher,
            state,
            disposed: AtomicBool::new(false),
        }
    }

    /// Observe every state transition.
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> FeedState {
        self.state.borrow().clone()
    }

    /// Run one fetch and fold its result into the state.
    ///
    /// At most one fetch is in flight: a call made while `refreshing` is set
    /// returns [`UpdateOutcome::Skipped`] without touching the fetcher.
    pub async fn update(&self) -> UpdateOutcome {
        if self.is_disposed() {
            return UpdateOutcome::Disposed;
        }

        // Check-and-set in one critical section so concurrent callers
        // cannot both start a fetch.
        let started = self
            .state
            .send_if_modified(|state| state.apply(FeedEvent::FetchStarted));
        if !started {
            debug!("Fetch already in flight, skipping update");
            return UpdateOutcome::Skipped;
        }
        debug!("Fetching news feed");

        let guard = RefreshGuard {
            state: &self.state,
            armed: true,
        };
        let result = self.fetcher.fetch().await;
        guard.disarm();

        if self.is_disposed() {
            debug!("Store disposed during fetch, discarding result");
            return UpdateOutcome::Discarded;
        }

        match result {
            Ok(items) => {
                info!("Feed refreshed with {} items", items.len());
                let mut applied = false;
                self.state.send_modify(|state| {
                    state.apply(FeedEvent::FetchSucceeded {
                        items,
                        at: Local::now(),
                    });
                    applied = state.error.is_none();
                });
                if applied {
                    UpdateOutcome::Updated
                } else {
                    UpdateOutcome::Failed
                }
            }
            Err(e) => {
                warn!("Feed refresh failed: {}", e);
                self.state.send_modify(|state| {
                    state.apply(FeedEvent::FetchFailed {
                        error: e.to_string(),
                    });
                });
                UpdateOutcome::Failed
            }
        }
    }

    /// Detach the store from its owner. Later updates are no-ops and a fetch
    /// still in flight will not write its result.
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            debug!("Feed store disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

/// Clears `refreshing` if an `update` future is dropped mid-fetch, so the
/// single-flight flag cannot stay stuck.
struct RefreshGuard<'a> {
    state: &'a watch::Sender<FeedState>,
    armed: bool,
}

impl RefreshGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!("Feed refresh cancelled before completion");
        self.state.send_modify(|state| {
            state.apply(FeedEvent::FetchFailed {
                error: "Refresh was cancelled".to_string(),
            });
        });
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{items, ScriptedFetcher};
    use super::*;
    use crate::fetcher::{FetchError, ShapeError};

    fn store_with(fetcher: Arc<ScriptedFetcher>) -> FeedStore {
        FeedStore::new(fetcher)
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_update_clears_refreshing() {
        let fetcher = Arc::new(ScriptedFetcher::gated(vec![Ok(items(&["a"]))]));
        let store = store_with(fetcher.clone());

        let cancelled =
            tokio::time::timeout(std::time::Duration::from_millis(50), store.update()).await;
        assert!(cancelled.is_err());

        let state = store.snapshot();
        assert!(!state.refreshing);
        assert_eq!(state.error.as_deref(), Some("Refresh was cancelled"));

        fetcher.release();
        assert_eq!(store.update().await, UpdateOutcome::Updated);
        assert_eq!(store.snapshot().items, items(&["a"]));
    }

    #[tokio::test]
    async fn test_update_success_replaces_items() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(items(&["a", "b", "c"]))]));
        let store = store_with(fetcher.clone());

        assert_eq!(store.update().await, UpdateOutcome::Updated);

        let state = store.snapshot();
        assert_eq!(state.items, items(&["a", "b", "c"]));
        assert!(state.last_updated.is_some());
        assert!(!state.loading);
        assert!(!state.refreshing);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_update_failures_keep_items() {
        let failures = vec![
            FetchError::Http { status: 500 },
            FetchError::Decode("bad".into()),
            FetchError::Shape(ShapeError::Empty),
            FetchError::Transport("refused".into()),
        ];

        for failure in failures {
            let fetcher = Arc::new(ScriptedFetcher::new(vec![
                Ok(items(&["a", "b"])),
                Err(failure.clone()),
            ]));
            let store = store_with(fetcher);
            store.update().await;
            let before = store.snapshot();

            assert_eq!(store.update().await, UpdateOutcome::Failed);

            let after = store.snapshot();
            assert_eq!(after.items, before.items);
            assert_eq!(after.last_updated, before.last_updated);
            assert_eq!(after.error, Some(failure.to_string()));
            assert!(!after.refreshing);
        }
    }

    #[tokio::test]
    async fn test_initial_failure_ends_loading() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Err(FetchError::Http {
            status: 404,
        })]));
        let store = store_with(fetcher);

        store.update().await;
        let state = store.snapshot();
        assert!(!state.loading);
        assert!(state.items.is_empty());
        assert!(state.last_updated.is_none());
        assert_eq!(state.error.as_deref(), Some("Server responded with HTTP 404"));
    }

    #[tokio::test]
    async fn test_success_after_failure_clears_error() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![
            Err(FetchError::Http { status: 500 }),
            Ok(items(&["a"])),
        ]));
        let store = store_with(fetcher);

        store.update().await;
        assert!(store.snapshot().error.is_some());
        store.update().await;
        assert!(store.snapshot().error.is_none());
    }

    #[tokio::test]
    async fn test_overlapping_update_is_skipped() {
        let fetcher = Arc::new(ScriptedFetcher::gated(vec![Ok(items(&["a"]))]));
        let store = Arc::new(store_with(fetcher.clone()));

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.update().await }
        });

        let mut rx = store.subscribe();
        rx.wait_for(|s| s.refreshing).await.unwrap();
        let during = store.snapshot();

        assert_eq!(store.update().await, UpdateOutcome::Skipped);
        assert_eq!(fetcher.call_count(), 1);
        assert_eq!(store.snapshot(), during);

        fetcher.release();
        assert_eq!(first.await.unwrap(), UpdateOutcome::Updated);
        assert!(!store.snapshot().refreshing);
    }

    #[tokio::test]
    async fn test_disposed_store_does_not_fetch() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(items(&["a"]))]));
        let store = store_with(fetcher.clone());

        store.dispose();
        assert_eq!(store.update().await, UpdateOutcome::Disposed);
        assert_eq!(fetcher.call_count(), 0);
        assert!(store.snapshot().loading);
    }

    #[tokio::test]
    async fn test_dispose_during_fetch_discards_result() {
        let fetcher = Arc::new(ScriptedFetcher::gated(vec![Ok(items(&["a"]))]));
        let store = Arc::new(store_with(fetcher.clone()));

        let pending = tokio::spawn({
            let store = store.clone();
            async move { store.update().await }
        });
        store.subscribe().wait_for(|s| s.refreshing).await.unwrap();

        store.dispose();
        fetcher.release();

        assert_eq!(pending.await.unwrap(), UpdateOutcome::Discarded);
        assert!(store.snapshot().items.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(items(&["a"]))]));
        let store = store_with(fetcher);
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.update().await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().items.len(), 1);
    }
}
