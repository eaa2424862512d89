//! Error types for Flagdex.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid progress import: {0}")]
    InvalidImport(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl ProgressError {
    /// Short machine-friendly label, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ProgressError::Io(_) => "io",
            ProgressError::Json(_) => "json",
            ProgressError::InvalidImport(_) => "invalid_import",
            ProgressError::Storage(_) => "storage",
            ProgressError::Config(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProgressError>;
