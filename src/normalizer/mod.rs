use html_escape::decode_html_entities;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::{ItemId, NewsItem};
use crate::fetcher::{FetchError, ShapeError};

/// Wire shape of one element of the news array.
///
/// Only `title` is required. Optional fields with the wrong JSON type are
/// treated as absent.
#[derive(Debug, Deserialize)]
struct RawNewsItem {
    #[serde(default, deserialize_with = "lenient")]
    id: Option<RawId>,
    title: String,
    #[serde(default, deserialize_with = "lenient")]
    url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    source: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    category: Option<String>,
    #[serde(default, rename = "isLatest", deserialize_with = "lenient")]
    is_latest: Option<bool>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    max_items: Option<usize>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `max_items` entries from the front of each response.
    pub fn with_max_items(max_items: Option<usize>) -> Self {
        Self { max_items }
    }

    pub fn normalize(&self, body: &[u8]) -> Result<Vec<NewsItem>, FetchError> {
        let payload: Value =
            serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

        let elements = match payload {
            Value::Array(elements) => elements,
            Value::Object(map) => {
                let shape = match map.get("error").and_then(Value::as_str) {
                    Some(message) => ShapeError::UpstreamError(message.to_string()),
                    None => ShapeError::NotAnArray,
                };
                return Err(shape.into());
            }
            _ => return Err(ShapeError::NotAnArray.into()),
        };

        if elements.is_empty() {
            return Err(ShapeError::Empty.into());
        }

        let limit = self.max_items.unwrap_or(usize::MAX);
        elements
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(index, element)| normalize_item(index, element))
            .collect()
    }
}

fn normalize_item(index: usize, element: Value) -> Result<NewsItem, FetchError> {
    let raw: RawNewsItem = serde_json::from_value(element).map_err(|e| ShapeError::InvalidItem {
        index,
        reason: e.to_string(),
    })?;

    let title = clean_text(&raw.title).ok_or_else(|| ShapeError::InvalidItem {
        index,
        reason: "title is empty".to_string(),
    })?;

    let id = match raw.id {
        Some(RawId::Text(id)) if !id.trim().is_empty() => ItemId::Provided(id),
        Some(RawId::Number(n)) => ItemId::Provided(n.to_string()),
        _ => ItemId::Positional(index),
    };

    Ok(NewsItem {
        id,
        title,
        url: raw
            .url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty()),
        source: raw.source.as_deref().and_then(clean_text),
        timestamp: raw
            .timestamp
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
        category: raw.category.as_deref().and_then(clean_text),
        is_latest: raw.is_latest.unwrap_or(false),
    })
}

/// Decode HTML entities and trim; blank text counts as absent.
fn clean_text(text: &str) -> Option<String> {
    let decoded = decode_html_entities(text);
    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
