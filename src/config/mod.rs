//! Configuration management for newsticker.
//!
//! Configuration is read from `~/.config/newsticker/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod display;
pub mod keybindings;

pub use colors::ColorConfig;
pub use display::DisplayConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::poller::parse_interval;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/news";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub display: DisplayConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Where and how often to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub endpoint: String,
    /// Interval between polls, e.g. "5s" or "30s".
    pub poll_interval: String,
    /// Per-request timeout; 0 disables it.
    pub request_timeout_secs: u64,
    /// Keep only the first N items of each response.
    pub max_items: Option<usize>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval: "30s".to_string(),
            request_timeout_secs: 10,
            max_items: None,
        }
    }
}

impl FeedConfig {
    pub fn poll_interval(&self) -> Result<Duration, ConfigError> {
        parse_interval(&self.poll_interval).map_err(ConfigError::Invalid)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file at the default location is created with commented
    /// defaults; a missing explicit path is an error. Missing fields fall
    /// back to their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: config_path,
                source,
            },
            other => other,
        })
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.feed.poll_interval()?;
        url::Url::parse(&self.feed.endpoint).map_err(|e| {
            ConfigError::Invalid(format!("endpoint {:?}: {}", self.feed.endpoint, e))
        })?;
        if self.feed.max_items == Some(0) {
            return Err(ConfigError::Invalid(
                "max_items must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the default config file path: `~/.config/newsticker/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("newsticker").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# newsticker configuration
#
# Durations accept "500ms", "5s", "30s", "1m" or a bare millisecond count.
# Colors accept names (Cyan, DarkGray, LightRed, ...) or "#RRGGBB" / "#RGB".
# Keys accept single characters, names (Enter, Esc, Up, PageDown, F1-F12)
# and modifiers ("Ctrl+c", "Shift+Tab").

[feed]
# News service returning a JSON array of items
endpoint = "http://localhost:5000/api/news"
poll_interval = "30s"
# Abort a request after this many seconds (0 = never)
request_timeout_secs = 10
# Uncomment to show only the first N items
# max_items = 5

[display]
header_badges = ["LIVE", "REAL-TIME"]
description = "Your real-time window into the world of technology."
latest_badge = "LATEST"
link_indicator = "🔗"
show_category_icons = true
# Show a detail popup for items without a link
modal_enabled = true
loading_text = "Loading news..."
refreshing_text = "Updating..."

[colors]
border = "Cyan"
header_badge_fg = "Black"
header_badge_bg = "Cyan"
selection_bg = "Cyan"
selection_fg = "Black"
number_badge = "Yellow"
latest_badge = "LightRed"
link_indicator = "Blue"
meta = "DarkGray"
error = "Red"
refreshing = "Yellow"
modal_border = "LightCyan"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
activate = ["Enter", "o"]
close = ["Esc", "x"]
refresh = ["r"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let config = Config::parse(&Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert_eq!(config.feed, FeedConfig::default());
        assert_eq!(config.display, DisplayConfig::default());
        assert_eq!(config.colors.border, ratatui::style::Color::Cyan);
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[feed]
poll_interval = "5s"
max_items = 5

[display]
latest_badge = "NEW"
"##;
        let config = Config::parse(content).expect("Partial config should work");

        assert_eq!(config.feed.poll_interval().unwrap(), Duration::from_secs(5));
        assert_eq!(config.feed.max_items, Some(5));
        assert_eq!(config.feed.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.display.latest_badge, "NEW");
        assert!(config.display.modal_enabled);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::parse("").expect("Empty config should work");
        assert_eq!(config.feed.poll_interval().unwrap(), Duration::from_secs(30));
        assert_eq!(config.feed.request_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = Config::parse("[feed]\nrequest_timeout_secs = 0\n").unwrap();
        assert_eq!(config.feed.request_timeout(), None);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Config::parse("[feed]\npoll_interval = \"soon\"\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[feed]\nendpoint = \"not a url\"\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[feed]\nmax_items = 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[feed\n"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[feed]\nendpoint = \"http://news.local/api/news\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.feed.endpoint, "http://news.local/api/news");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_parse_error_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[feed\n").unwrap();

        match Config::load(Some(&path)) {
            Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_create_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::create_default_config(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(Config::parse(&written).is_ok());
    }
}
