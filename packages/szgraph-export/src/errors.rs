//! Error types for szgraph-export
//!
//! Every variant is fatal for a run: the exporter never skips a record or
//! retries a query.

use szgraph_storage::StorageError;
use thiserror::Error;

/// Main error type for export operations
#[derive(Debug, Error)]
pub enum ExportError {
    /// Engine settings, attribute schema or export settings unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// A record payload is not a well-formed JSON mapping
    #[error("Payload parse error: {0}")]
    PayloadParse(String),

    /// Record, relationship or id source failed
    #[error("Data access error: {0}")]
    DataAccess(#[from] StorageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output document could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ExportError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        ExportError::Config(msg.into())
    }

    /// Create a payload parse error
    pub fn payload(msg: impl Into<String>) -> Self {
        ExportError::PayloadParse(msg.into())
    }

    /// Short machine-readable kind, used in the final log line
    pub fn kind(&self) -> &'static str {
        match self {
            ExportError::Config(_) => "config",
            ExportError::PayloadParse(_) => "payload_parse",
            ExportError::DataAccess(_) => "data_access",
            ExportError::Io(_) => "io",
            ExportError::Serialization(_) => "serialization",
        }
    }
}

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, ExportError>;
