use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("Input file or directory not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to compress {path}: {reason}")]
    Processing { path: PathBuf, reason: String },

    #[error("Failed to create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

impl CompressionError {
    pub fn processing(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CompressionError::Processing {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompressionError>;
