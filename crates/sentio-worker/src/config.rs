use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;

use crate::error::{Result, WorkerError};

pub const DATA_FILE_VAR: &str = "SENTIO_DATA_FILE";
pub const DB_PATH_VAR: &str = "SENTIO_DB_PATH";
pub const REFRESH_SECS_VAR: &str = "SENTIO_REFRESH_SECS";
pub const CHART_SOURCE_VAR: &str = "SENTIO_CHART_SOURCE";

const DEFAULT_DATA_FILE: &str = "data/project_live.json";
const DB_FILE_NAME: &str = "project_db.sqlite";
const DEFAULT_REFRESH: Duration = Duration::from_secs(2);

/// Where the dashboard reads its history from on each refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartSource {
    /// Re-parse the JSON message log.
    #[default]
    Log,
    /// Aggregate the stored rows in SQL.
    Store,
}

impl FromStr for ChartSource {
    type Err = WorkerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(Self::Log),
            "store" => Ok(Self::Store),
            other => Err(WorkerError::Config(format!(
                "unknown chart source '{other}', expected 'log' or 'store'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentioConfig {
    pub data_file: PathBuf,
    pub db_path: PathBuf,
    pub refresh_interval: Duration,
    pub chart_source: ChartSource,
    pub color: bool,
}

impl Default for SentioConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            db_path: default_db_path(),
            refresh_interval: DEFAULT_REFRESH,
            chart_source: ChartSource::default(),
            color: true,
        }
    }
}

impl SentioConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup` on top of the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup(DATA_FILE_VAR) {
            config.data_file = PathBuf::from(path);
        }

        if let Some(path) = lookup(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(secs) = lookup(REFRESH_SECS_VAR) {
            config.refresh_interval = parse_interval(&secs)?;
        }

        if let Some(source) = lookup(CHART_SOURCE_VAR) {
            config.chart_source = source.parse()?;
        }

        // https://no-color.org
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.color = false;
        }

        Ok(config)
    }
}

fn parse_interval(secs: &str) -> Result<Duration> {
    let value: f64 = secs.trim().parse().map_err(|_| {
        WorkerError::Config(format!("{REFRESH_SECS_VAR} must be a number, got '{secs}'"))
    })?;

    if !value.is_finite() || value <= 0.0 {
        return Err(WorkerError::Config(format!(
            "{REFRESH_SECS_VAR} must be positive, got {value}"
        )));
    }

    Ok(Duration::from_secs_f64(value))
}

fn default_db_path() -> PathBuf {
    ProjectDirs::from("io", "sentio", "sentio")
        .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}
