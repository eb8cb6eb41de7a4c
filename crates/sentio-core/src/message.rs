use chrono::{DateTime, Local};
use serde::Deserialize;

pub const DEFAULT_AUTHOR: &str = "Unknown";
pub const DEFAULT_CATEGORY: &str = "other";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A message as produced upstream. Every field may be missing; unknown
/// fields (an incoming `message_length` included) are dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMessage {
    pub message: Option<String>,
    pub author: Option<String>,
    pub timestamp: Option<String>,
    pub category: Option<String>,
    pub sentiment: Option<f64>,
    pub keyword_mentioned: Option<String>,
}

impl RawMessage {
    pub fn author_or_default(&self) -> &str {
        self.author.as_deref().unwrap_or(DEFAULT_AUTHOR)
    }

    pub fn sentiment_or_default(&self) -> f64 {
        self.sentiment.unwrap_or_default()
    }
}

/// A message with every column resolved, ready to be appended to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub message: String,
    pub author: String,
    pub timestamp: String,
    pub category: String,
    pub sentiment: f64,
    pub keyword_mentioned: Option<String>,
    pub message_length: i64,
}

impl NewMessage {
    pub fn from_raw(raw: RawMessage) -> Self {
        Self::from_raw_at(raw, Local::now())
    }

    /// `now` stamps messages that arrive without a timestamp.
    pub fn from_raw_at(raw: RawMessage, now: DateTime<Local>) -> Self {
        let message = raw.message.unwrap_or_default();
        // Counted in chars, never trusted from input.
        let message_length = message.chars().count() as i64;

        Self {
            author: raw.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            timestamp: raw
                .timestamp
                .unwrap_or_else(|| now.format(TIMESTAMP_FORMAT).to_string()),
            category: raw.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            sentiment: raw.sentiment.unwrap_or_default(),
            keyword_mentioned: raw.keyword_mentioned,
            message_length,
            message,
        }
    }
}
