use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use tracing::debug;

use crate::app::Result;
use crate::domain::NewsItem;
use crate::fetcher::{FetchError, Fetcher};
use crate::normalizer::Normalizer;

pub struct HttpFetcher {
    client: Client,
    endpoint: String,
    normalizer: Normalizer,
}

impl HttpFetcher {
    /// Build a fetcher for `endpoint`. A `timeout` of `None` leaves requests
    /// unbounded.
    pub fn new(endpoint: &str, timeout: Option<Duration>, normalizer: Normalizer) -> Result<Self> {
        let endpoint = url::Url::parse(endpoint)?.to_string();

        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("newsticker/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
            normalizer,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self) -> std::result::Result<Vec<NewsItem>, FetchError> {
        debug!("GET {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        self.normalizer.normalize(&body)
    }
}
