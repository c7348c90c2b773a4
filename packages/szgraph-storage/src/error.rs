//! Repository access errors
//!
//! Every failure carries a [`ErrorKind`] so callers can tell an unreachable
//! database from a missing table or an unreadable stored document.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Database file missing, unreadable or not a database
    Open,
    /// Statement failed (missing table, bad column, locked database)
    Query,
    /// Stored document is not valid JSON
    Document,
    /// `SYS_CFG` holds no engine configuration
    ConfigNotFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Open => "open",
            ErrorKind::Query => "query",
            ErrorKind::Document => "document",
            ErrorKind::ConfigNotFound => "config_not_found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct StorageError {
    pub kind: ErrorKind,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn open(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Open, message)
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Query, message)
    }

    pub fn document(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Document, message)
    }

    pub fn config_not_found() -> Self {
        Self::new(
            ErrorKind::ConfigNotFound,
            "No engine configuration stored in SYS_CFG",
        )
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::query(err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::document(format!("invalid JSON at line {}: {}", err.line(), err))
            .with_source(err)
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_includes_kind() {
        let err = StorageError::query("no such table: RES_RELATE");
        assert_eq!(err.to_string(), "[query] no such table: RES_RELATE");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_config_not_found() {
        let err = StorageError::config_not_found();
        assert_eq!(err.kind, ErrorKind::ConfigNotFound);
        assert!(err.to_string().starts_with("[config_not_found]"));
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_rusqlite_error_is_query_failure() {
        let err: StorageError = rusqlite::Error::InvalidColumnIndex(9).into();
        assert_eq!(err.kind, ErrorKind::Query);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_bad_stored_document() {
        let json_err = serde_json::from_str::<serde_json::Value>("{\"G2_CONFIG\": ")
            .err()
            .unwrap();
        let err: StorageError = json_err.into();
        assert_eq!(err.kind, ErrorKind::Document);
        assert!(err.message.starts_with("invalid JSON at line 1"));
    }
}
