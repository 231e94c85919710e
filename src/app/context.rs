use std::sync::Arc;
use std::time::Duration;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::navigation::{BrowserNavigator, NavigationPort};
use crate::normalizer::Normalizer;
use crate::poller::Poller;
use crate::store::FeedStore;

/// Everything one live feed needs, built from configuration.
pub struct AppContext {
    pub store: Arc<FeedStore>,
    pub navigator: Arc<dyn NavigationPort + Send + Sync>,
    pub endpoint: String,
    pub poll_interval: Duration,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self> {
        let normalizer = Normalizer::with_max_items(config.feed.max_items);
        let fetcher = HttpFetcher::new(
            &config.feed.endpoint,
            config.feed.request_timeout(),
            normalizer,
        )?;
        let endpoint = fetcher.endpoint().to_string();

        Ok(Self::with_parts(
            Arc::new(fetcher),
            Arc::new(BrowserNavigator::new()),
            endpoint,
            config.feed.poll_interval()?,
        ))
    }

    /// Assemble a context from explicit collaborators.
    pub fn with_parts(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        navigator: Arc<dyn NavigationPort + Send + Sync>,
        endpoint: String,
        poll_interval: Duration,
    ) -> Self {
        Self {
            store: Arc::new(FeedStore::new(fetcher)),
            navigator,
            endpoint,
            poll_interval,
        }
    }

    /// Poll the store on the configured interval, starting immediately.
    pub fn start_polling(&self) -> Poller {
        let store = self.store.clone();
        Poller::start(self.poll_interval, move || {
            let store = store.clone();
            async move {
                store.update().await;
            }
        })
    }
}
