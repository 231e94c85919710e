//! Opening external links.

use tracing::info;
use url::Url;

use crate::app::{NewsTickerError, Result};

/// Capability to show a URL in a new, isolated browsing context.
pub trait NavigationPort {
    fn open_external(&self, url: &str) -> Result<()>;
}

/// Hands links to the system's default browser.
///
/// The browser is launched as a detached process, so it holds no handle back
/// to this session and receives nothing but the URL itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl BrowserNavigator {
    pub fn new() -> Self {
        Self
    }
}

impl NavigationPort for BrowserNavigator {
    fn open_external(&self, url: &str) -> Result<()> {
        let url = validate_link(url)?;
        info!("Opening {} in browser", url);
        open::that_detached(url.as_str())
            .map_err(|e| NewsTickerError::Navigation(format!("{}: {}", url, e)))
    }
}

/// Only web links are handed to the opener.
pub fn validate_link(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(NewsTickerError::Navigation(format!(
            "refusing to open {} link: {}",
            other, raw
        ))),
    }
}
