//! Driver Error Types

use thiserror::Error;

/// Errors that can occur while configuring or running a filter job
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid sample on line {line}: {value:?}")]
    InvalidSample { line: u64, value: String },

    #[error("Worker thread failed: {0}")]
    WorkerError(String),

    #[error("DSP error: {0}")]
    DspError(#[from] bwfilter_dsp::DspError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for driver operations
pub type CoreResult<T> = Result<T, CoreError>;
