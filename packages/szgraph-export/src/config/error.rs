//! Configuration error types

use thiserror::Error;

use crate::errors::ExportError;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Range validation error
    #[error("Invalid value for field '{field}': {value}. {hint}")]
    Range {
        field: String,
        value: String,
        hint: String,
    },

    /// Missing version field in YAML
    #[error("Missing 'version' field in settings file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported settings version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Neither engine configuration variable is set
    #[error("Engine environment not set: export SENZING_ENGINE_CONFIGURATION_JSON or SENZING_CONFIG_FILE")]
    EnvironmentNotSet,

    /// Engine settings lack `SQL.CONNECTION`
    #[error("No SQL connection in engine settings")]
    MissingConnection,

    /// Database scheme other than sqlite3
    #[error("Unsupported database connection '{0}': direct access requires sqlite3://")]
    UnsupportedBackend(String),

    /// Engine INI file could not be parsed
    #[error("Engine settings file error: {0}")]
    Settings(#[from] ::config::ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub fn range(field: impl Into<String>, value: impl ToString, hint: impl Into<String>) -> Self {
        Self::Range {
            field: field.into(),
            value: value.to_string(),
            hint: hint.into(),
        }
    }
}

impl From<ConfigError> for ExportError {
    fn from(err: ConfigError) -> Self {
        ExportError::Config(err.to_string())
    }
}
