mod config;
mod error;
mod events;
mod worker;

pub use config::{ChartSource, SentioConfig};
pub use error::WorkerError;
pub use events::WorkerEvent;
pub use worker::SentioWorker;

pub use sentio_core::{AuthorSentiment, RawMessage, SentimentSummary};
pub use sentio_db::StoredMessageRow;
