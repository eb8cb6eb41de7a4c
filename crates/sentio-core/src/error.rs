use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Record {index} is not a JSON object")]
    NotAnObject { index: usize },
}

pub type Result<T> = std::result::Result<T, ReadError>;
