use thiserror::Error;

#[derive(Error, Debug)]
pub enum RebalanceError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RebalanceError>;
