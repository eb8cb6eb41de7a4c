use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use sentio_core::{NewMessage, RawMessage, SentimentSummary};
use sentio_db::{SentioDb, StoredMessageRow};

use crate::config::{ChartSource, SentioConfig};
use crate::error::Result;
use crate::events::WorkerEvent;

pub struct SentioWorker {
    config: SentioConfig,
    db: SentioDb,
    event_tx: mpsc::Sender<WorkerEvent>,
    event_rx: Option<mpsc::Receiver<WorkerEvent>>,
}

impl SentioWorker {
    /// Builds the worker and initializes the store, discarding any rows left
    /// from a previous run.
    pub async fn new(config: SentioConfig) -> Result<Self> {
        let db = SentioDb::initialize(&config.db_path).await?;
        let (event_tx, event_rx) = mpsc::channel(1000);

        let worker = Self {
            config,
            db,
            event_tx,
            event_rx: Some(event_rx),
        };
        worker.emit(WorkerEvent::StoreReady {
            path: worker.db.path().to_path_buf(),
        });

        Ok(worker)
    }

    pub fn take_event_receiver(&mut self) -> Option<mpsc::Receiver<WorkerEvent>> {
        self.event_rx.take()
    }

    pub fn db(&self) -> &SentioDb {
        &self.db
    }

    /// Reads the most recent message from the data file and stores it.
    /// Returns `None` when the file holds no message.
    pub async fn ingest_latest(&self) -> Result<Option<StoredMessageRow>> {
        let Some(raw) = sentio_core::read_latest(&self.config.data_file)? else {
            self.emit(WorkerEvent::NoMessage);
            return Ok(None);
        };

        Ok(Some(self.ingest(raw).await?))
    }

    pub async fn ingest(&self, raw: RawMessage) -> Result<StoredMessageRow> {
        tracing::debug!(?raw, "Processing message");

        let message = NewMessage::from_raw(raw);
        let id = self.db.insert_message(&message).await?;
        let row = self.db.get_message(id).await?;

        self.emit(WorkerEvent::MessageStored {
            id,
            author: row.author.clone(),
        });

        Ok(row)
    }

    /// Re-reads the full history from the configured source and aggregates it.
    pub async fn refresh_summary(&self) -> Result<SentimentSummary> {
        let summary = match self.config.chart_source {
            ChartSource::Log => {
                let records = sentio_core::read_all(&self.config.data_file)?;
                sentio_core::summarize(&records)
            }
            ChartSource::Store => SentimentSummary::from(self.db.author_sentiment().await?),
        };

        Ok(summary)
    }

    /// Refreshes the summary every `refresh_interval` until `shutdown`
    /// resolves. The first refresh happens immediately; the first failed
    /// refresh ends the loop and is returned.
    pub async fn run_dashboard(&self, shutdown: impl Future<Output = ()>) -> Result<()> {
        let mut ticker = tokio::time::interval(self.config.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(
            source = ?self.config.chart_source,
            interval = ?self.config.refresh_interval,
            "Starting dashboard"
        );

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    tracing::info!("Dashboard stopped");
                    return Ok(());
                }

                _ = ticker.tick() => {
                    match self.refresh_summary().await {
                        Ok(summary) => {
                            tracing::debug!(
                                authors = summary.authors.len(),
                                messages = summary.total_messages(),
                                "Visualization updated"
                            );
                            self.emit(WorkerEvent::ChartRefreshed { summary });
                        }
                        Err(e) => {
                            tracing::error!("Failed to refresh visualization: {}", e);
                            self.emit(WorkerEvent::RefreshFailed { error: e.to_string() });
                            return Err(e);
                        }
                    }
                }
            }
        }
    }

    fn emit(&self, event: WorkerEvent) {
        // Never blocks: events are dropped while the channel is full.
        if let Err(e) = self.event_tx.try_send(event) {
            tracing::trace!("Dropped worker event: {}", e);
        }
    }
}
