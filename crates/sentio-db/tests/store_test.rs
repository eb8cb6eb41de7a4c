//! Integration tests for [`sentio_db::SentioDb`].
//!
//! Each test works on an SQLite file inside a fresh temporary directory.

use chrono::{Local, TimeZone};
use sentio_core::{NewMessage, RawMessage};
use sentio_db::{DbError, SentioDb};

fn new_message(json: &str) -> NewMessage {
    let raw: RawMessage = serde_json::from_str(json).expect("valid message json");
    let now = Local.with_ymd_and_hms(2025, 1, 29, 14, 35, 20).unwrap();
    NewMessage::from_raw_at(raw, now)
}

/// **Test: Stored row matches the normalized message.**
///
/// **Setup:** Initialized store; message with only message, author, sentiment.
/// **Action:** `insert_message` then `get_message(id)`.
/// **Expected:** Defaults for category and keyword, derived length, stamped timestamp.
#[tokio::test]
async fn test_insert_applies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let db = SentioDb::initialize(dir.path().join("project_db.sqlite"))
        .await
        .expect("Failed to initialize store");

    let id = db
        .insert_message(&new_message(r#"{"message":"hi","author":"Bob","sentiment":0.5}"#))
        .await
        .expect("Failed to insert message");

    let row = db.get_message(id).await.expect("Failed to get message");
    assert_eq!(row.message, "hi");
    assert_eq!(row.author, "Bob");
    assert_eq!(row.sentiment, 0.5);
    assert_eq!(row.category, "other");
    assert_eq!(row.keyword_mentioned, None);
    assert_eq!(row.message_length, 2);
    assert_eq!(row.timestamp, "2025-01-29 14:35:20");
}

/// **Test: Initializing twice discards the history.**
///
/// **Setup:** Initialize, insert two messages.
/// **Action:** Initialize the same path again.
/// **Expected:** Zero rows.
#[tokio::test]
async fn test_initialize_twice_leaves_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project_db.sqlite");

    let db = SentioDb::initialize(&path).await.unwrap();
    db.insert_message(&new_message(r#"{"author":"A"}"#)).await.unwrap();
    db.insert_message(&new_message(r#"{"author":"B"}"#)).await.unwrap();
    assert_eq!(db.count_messages().await.unwrap(), 2);
    db.close().await;

    let db = SentioDb::initialize(&path).await.unwrap();
    assert_eq!(db.count_messages().await.unwrap(), 0);
}

/// **Test: Opening keeps existing rows.**
#[tokio::test]
async fn test_open_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project_db.sqlite");

    let db = SentioDb::initialize(&path).await.unwrap();
    db.insert_message(&new_message(r#"{"author":"A"}"#)).await.unwrap();
    db.close().await;

    let db = SentioDb::open(&path).await.unwrap();
    assert_eq!(db.count_messages().await.unwrap(), 1);
}

/// **Test: Missing parent directories are created.**
#[tokio::test]
async fn test_initialize_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("project_db.sqlite");

    let db = SentioDb::initialize(&path).await.unwrap();

    assert!(path.exists());
    assert_eq!(db.path(), path.as_path());
}

/// **Test: Ids increase with each insert.**
#[tokio::test]
async fn test_ids_are_monotonic() {
    let dir = tempfile::tempdir().unwrap();
    let db = SentioDb::initialize(dir.path().join("db.sqlite")).await.unwrap();

    let first = db.insert_message(&new_message("{}")).await.unwrap();
    let second = db.insert_message(&new_message("{}")).await.unwrap();

    assert!(second > first);
    let rows = db.list_messages().await.unwrap();
    assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), [first, second]);
}

/// **Test: Unknown id is reported as not found.**
#[tokio::test]
async fn test_get_message_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let db = SentioDb::initialize(dir.path().join("db.sqlite")).await.unwrap();

    let err = db.get_message(42).await.unwrap_err();

    assert!(matches!(err, DbError::MessageNotFound(42)));
}

/// **Test: Per-author aggregation in SQL.**
///
/// **Setup:** A twice (1.0, 0.0), then B once (-0.5).
/// **Expected:** A count 2 mean 0.5, B count 1 mean -0.5, A listed first.
#[tokio::test]
async fn test_author_sentiment() {
    let dir = tempfile::tempdir().unwrap();
    let db = SentioDb::initialize(dir.path().join("db.sqlite")).await.unwrap();

    for json in [
        r#"{"author":"A","sentiment":1.0}"#,
        r#"{"author":"B","sentiment":-0.5}"#,
        r#"{"author":"A","sentiment":0.0}"#,
    ] {
        db.insert_message(&new_message(json)).await.unwrap();
    }

    let stats = db.author_sentiment().await.unwrap();

    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].author, "A");
    assert_eq!(stats[0].message_count, 2);
    assert_eq!(stats[0].average_sentiment, 0.5);
    assert_eq!(stats[1].author, "B");
    assert_eq!(stats[1].average_sentiment, -0.5);
}
