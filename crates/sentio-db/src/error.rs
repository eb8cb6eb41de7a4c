use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Message not found: {0}")]
    MessageNotFound(i64),
}

pub type Result<T> = std::result::Result<T, DbError>;
