use std::io::{self, Write};

use color_eyre::eyre::{Context, Result};
use owo_colors::OwoColorize;
use sentio_core::{ChartStyle, render_chart};
use sentio_worker::{SentioConfig, SentioWorker, WorkerEvent};
use tokio::sync::mpsc;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .from_env_lossy()
                .add_directive("sentio_cli=info".parse()?)
                .add_directive("sentio_worker=info".parse()?)
                .add_directive("sentio_db=info".parse()?)
                .add_directive("sentio_core=info".parse()?),
        )
        .init();

    let config = SentioConfig::from_env().wrap_err("Failed to load configuration")?;
    print_banner(config.color);

    tracing::info!("Data file: {}", config.data_file.display());
    tracing::info!("Database path: {}", config.db_path.display());

    let style = ChartStyle {
        color: config.color,
        ..ChartStyle::default()
    };

    let mut worker = SentioWorker::new(config)
        .await
        .wrap_err("Failed to initialize the message store")?;

    let event_rx = worker
        .take_event_receiver()
        .ok_or_else(|| color_eyre::eyre::eyre!("Failed to get event receiver"))?;
    let printer = tokio::spawn(print_events(event_rx, style));

    match worker.ingest_latest().await {
        Ok(Some(row)) => tracing::info!(id = row.id, author = %row.author, "Message processed"),
        Ok(None) => tracing::error!("No message found to process."),
        Err(e) => tracing::error!("No message found to process: {}", e),
    }

    let result = worker.run_dashboard(shutdown_signal()).await;

    worker.db().close().await;
    drop(worker);
    printer.await.wrap_err("Event printer panicked")?;

    result.wrap_err("Visualization stopped")
}

fn print_banner(color: bool) {
    let banner = r#"
                  _   _
  ___  ___ _ __ | |_(_) ___
 / __|/ _ \ '_ \| __| |/ _ \
 \__ \  __/ | | | |_| | (_) |
 |___/\___|_| |_|\__|_|\___/

    Live Author Sentiment
"#;
    if color {
        println!("{}", banner.bright_green());
    } else {
        println!("{}", banner);
    }
}

async fn print_events(mut rx: mpsc::Receiver<WorkerEvent>, style: ChartStyle) {
    while let Some(event) = rx.recv().await {
        match event {
            WorkerEvent::ChartRefreshed { summary } => {
                let mut out = io::stdout().lock();
                let _ = write!(out, "{CLEAR_SCREEN}{}", render_chart(&summary, &style));
                let _ = out.flush();
            }
            WorkerEvent::RefreshFailed { error } => {
                tracing::error!("Visualization stopped: {}", error);
            }
            WorkerEvent::MessageStored { id, author } => {
                tracing::debug!(id, %author, "Message stored");
            }
            WorkerEvent::StoreReady { path } => {
                tracing::debug!("Store ready at {}", path.display());
            }
            WorkerEvent::NoMessage => {}
        }
    }
}

/// Resolves on Ctrl-C. If the handler cannot be installed the dashboard runs
/// until the process is killed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
