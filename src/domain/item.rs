use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a news item within one response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    /// Supplied by the upstream service.
    Provided(String),
    /// Position in the response array; only meaningful within a single fetch.
    Positional(usize),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Provided(id) => f.write_str(id),
            ItemId::Positional(index) => write!(f, "#{}", index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: ItemId,
    pub title: String,
    pub url: Option<String>,
    pub source: Option<String>,
    pub timestamp: Option<String>,
    pub category: Option<String>,
    pub is_latest: bool,
}

impl NewsItem {
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: None,
            source: None,
            timestamp: None,
            category: None,
            is_latest: false,
        }
    }

    /// Items with a link open externally; the rest are informational.
    pub fn is_clickable(&self) -> bool {
        self.url.is_some()
    }

    /// Source and timestamp joined for a single meta line.
    pub fn display_meta(&self) -> String {
        match (self.source.as_deref(), self.timestamp.as_deref()) {
            (Some(source), Some(timestamp)) => format!("{} · {}", source, timestamp),
            (Some(source), None) => source.to_string(),
            (None, Some(timestamp)) => timestamp.to_string(),
            (None, None) => String::new(),
        }
    }
}
