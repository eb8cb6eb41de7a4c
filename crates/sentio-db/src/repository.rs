use std::path::{Path, PathBuf};

use sentio_core::{AuthorSentiment, DEFAULT_AUTHOR, NewMessage};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::error::{DbError, Result};
use crate::models::StoredMessageRow;
use crate::schema::{DROP_SCHEMA, SCHEMA};

pub struct SentioDb {
    pool: Pool<Sqlite>,
    path: PathBuf,
}

impl SentioDb {
    /// Opens the store at `path`, creating parent directories, the file and
    /// the table as needed. Existing rows are kept.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        sqlx::raw_sql(SCHEMA).execute(&pool).await?;

        Ok(Self { pool, path })
    }

    /// Opens the store at `path` and drops every previously stored message.
    pub async fn initialize(path: impl AsRef<Path>) -> Result<Self> {
        let db = Self::open(path).await?;
        db.reset().await?;

        tracing::info!("Database initialized and table ready at: {}", db.path.display());

        Ok(db)
    }

    /// Drops and recreates the message table.
    pub async fn reset(&self) -> Result<()> {
        sqlx::raw_sql(DROP_SCHEMA).execute(&self.pool).await?;
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one message and returns its id.
    pub async fn insert_message(&self, message: &NewMessage) -> Result<i64> {
        let result = sqlx::query(
            r#"INSERT INTO streamed_messages
               (message, author, timestamp, category, sentiment, keyword_mentioned, message_length)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&message.message)
        .bind(&message.author)
        .bind(&message.timestamp)
        .bind(&message.category)
        .bind(message.sentiment)
        .bind(message.keyword_mentioned.as_deref())
        .bind(message.message_length)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::info!(id, author = %message.author, "Inserted one message into the database");

        Ok(id)
    }

    pub async fn get_message(&self, id: i64) -> Result<StoredMessageRow> {
        sqlx::query_as::<_, StoredMessageRow>("SELECT * FROM streamed_messages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::MessageNotFound(id))
    }

    pub async fn list_messages(&self) -> Result<Vec<StoredMessageRow>> {
        Ok(
            sqlx::query_as::<_, StoredMessageRow>("SELECT * FROM streamed_messages ORDER BY id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    pub async fn count_messages(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM streamed_messages")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Per-author message count and mean sentiment, authors in order of their
    /// first stored message.
    pub async fn author_sentiment(&self) -> Result<Vec<AuthorSentiment>> {
        let rows: Vec<(Option<String>, i64, Option<f64>)> = sqlx::query_as(
            "SELECT author, COUNT(*), AVG(sentiment) FROM streamed_messages GROUP BY author ORDER BY MIN(id)",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(author, count, average)| AuthorSentiment {
                author: author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
                message_count: count as usize,
                average_sentiment: average.unwrap_or_default(),
            })
            .collect())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
