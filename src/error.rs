use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration load error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Missing required column '{column}' in {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Station {station} not found")]
    StationNotFound { station: String },

    #[error("Station {station} failed: {source}")]
    Station {
        station: String,
        #[source]
        source: Box<ProcessingError>,
    },

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ProcessingError {
    /// Attach the station id to an error raised inside that station's worker.
    pub fn for_station(station: &str, source: ProcessingError) -> Self {
        ProcessingError::Station {
            station: station.to_string(),
            source: Box::new(source),
        }
    }
}
