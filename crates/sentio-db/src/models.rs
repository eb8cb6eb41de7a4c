use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredMessageRow {
    pub id: i64,
    pub message: String,
    pub author: String,
    pub timestamp: String,
    pub category: String,
    pub sentiment: f64,
    pub keyword_mentioned: Option<String>,
    pub message_length: i64,
}
