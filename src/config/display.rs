//! Presentation switches for the live feed.

use serde::Deserialize;

/// Options that distinguish the feed's presentation variants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Labels shown in the header, left to right.
    pub header_badges: Vec<String>,
    pub description: Option<String>,
    /// Text of the badge on items flagged as latest.
    pub latest_badge: String,
    /// Marker appended to items that open a link.
    pub link_indicator: String,
    pub show_category_icons: bool,
    /// When false, items without a link are purely informational.
    pub modal_enabled: bool,
    pub loading_text: String,
    pub refreshing_text: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            header_badges: vec!["LIVE".to_string(), "REAL-TIME".to_string()],
            description: Some(
                "Your real-time window into the world of technology.".to_string(),
            ),
            latest_badge: "LATEST".to_string(),
            link_indicator: "🔗".to_string(),
            show_category_icons: true,
            modal_enabled: true,
            loading_text: "Loading news...".to_string(),
            refreshing_text: "Updating...".to_string(),
        }
    }
}
