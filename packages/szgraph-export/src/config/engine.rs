//! Engine settings (where the repository database lives)
//!
//! Resolution order:
//! 1. `SENZING_ENGINE_CONFIGURATION_JSON`: JSON with `SQL.CONNECTION`
//! 2. `SENZING_CONFIG_FILE`: INI file with a `[SQL]` section

use std::path::{Path, PathBuf};

use config::Source;

use super::error::{ConfigError, ConfigResult};

pub const ENGINE_JSON_VAR: &str = "SENZING_ENGINE_CONFIGURATION_JSON";
pub const ENGINE_INI_VAR: &str = "SENZING_CONFIG_FILE";

const SQLITE_SCHEME: &str = "sqlite3://";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Connection string, e.g. `sqlite3://na:na@/var/opt/senzing/sqlite/G2C.db`
    pub connection: String,
}

impl EngineSettings {
    /// Read settings from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::resolve(
            std::env::var(ENGINE_JSON_VAR).ok(),
            std::env::var(ENGINE_INI_VAR).ok(),
        )
    }

    /// Pick the JSON settings if present, else the INI file
    pub fn resolve(json: Option<String>, ini_path: Option<String>) -> ConfigResult<Self> {
        match (json.filter(|j| !j.is_empty()), ini_path.filter(|p| !p.is_empty())) {
            (Some(json), _) => Self::from_json(&json),
            (None, Some(path)) => Self::from_ini_file(path),
            (None, None) => Err(ConfigError::EnvironmentNotSet),
        }
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let connection = value
            .get("SQL")
            .and_then(|sql| sql.get("CONNECTION"))
            .and_then(|c| c.as_str())
            .ok_or(ConfigError::MissingConnection)?;
        Ok(Self {
            connection: connection.to_string(),
        })
    }

    pub fn from_ini_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ini(&text)
    }

    /// `CONNECTION` inside `[SQL]`; section and key names are case-insensitive,
    /// `=` and `:` both separate keys from values
    pub fn from_ini(text: &str) -> ConfigResult<Self> {
        let sections = ::config::Config::builder()
            .add_source(::config::File::from_str(text, ::config::FileFormat::Ini))
            .build()?
            .collect()?;

        let Some((_, sql)) = sections
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("SQL"))
        else {
            return Err(ConfigError::MissingConnection);
        };
        let connection = sql
            .into_table()?
            .into_iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("CONNECTION"))
            .ok_or(ConfigError::MissingConnection)?
            .1
            .into_string()?;

        Ok(Self {
            connection: connection.trim().to_string(),
        })
    }

    /// Database file named by the connection string
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        parse_connection(&self.connection)
    }
}

/// Extract the file path from a `sqlite3://[user:pass@]/path` connection
pub fn parse_connection(uri: &str) -> ConfigResult<PathBuf> {
    let rest = uri
        .strip_prefix(SQLITE_SCHEME)
        .ok_or_else(|| ConfigError::UnsupportedBackend(uri.to_string()))?;
    // credentials are ignored for sqlite
    let path = match rest.rfind('@') {
        Some(at) => &rest[at + 1..],
        None => rest,
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ConfigError::UnsupportedBackend(uri.to_string()));
    }
    Ok(PathBuf::from(path))
}
