use std::path::PathBuf;

use sentio_core::SentimentSummary;

#[derive(Debug, Clone)]
pub enum WorkerEvent {
    StoreReady { path: PathBuf },
    MessageStored { id: i64, author: String },
    NoMessage,
    ChartRefreshed { summary: SentimentSummary },
    RefreshFailed { error: String },
}
