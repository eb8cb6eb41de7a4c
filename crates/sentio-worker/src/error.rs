use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Database error: {0}")]
    Db(#[from] sentio_db::DbError),

    #[error("Failed to read messages: {0}")]
    Read(#[from] sentio_core::ReadError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WorkerError>;
