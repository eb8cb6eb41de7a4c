pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS streamed_messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    message TEXT,
    author TEXT,
    timestamp TEXT,
    category TEXT,
    sentiment REAL,
    keyword_mentioned TEXT,
    message_length INTEGER
);
"#;

pub const DROP_SCHEMA: &str = "DROP TABLE IF EXISTS streamed_messages;";
