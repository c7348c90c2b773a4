//! Export configuration
//!
//! - `ExportConfig`: what to export and how to page through it
//! - `EngineSettings`: where the repository database is
//! - YAML settings file (`io`), versioned, unknown fields rejected

pub mod engine;
pub mod error;
pub mod io;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

pub use engine::{parse_connection, EngineSettings};
pub use error::{ConfigError, ConfigResult};
use io::{SettingsFileV1, SUPPORTED_VERSIONS};

pub const DEFAULT_CHUNK_SIZE: i64 = 1_000_000;
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

/// What to do when a disclosed relationship points at a record that does
/// not exist. The edge is dropped either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTargetPolicy {
    /// Drop quietly (debug log only)
    #[default]
    Silent,
    /// Drop with a warning per pointer
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Also emit RECORD nodes and Disclosed edges (second document)
    pub include_source_nodes: bool,
    /// Entity ids fetched per range query
    pub chunk_size: i64,
    /// Entities / relationships between progress log lines
    pub progress_interval: u64,
    pub missing_target_policy: MissingTargetPolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_source_nodes: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            missing_target_policy: MissingTargetPolicy::Silent,
        }
    }
}

impl ExportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_source_nodes(mut self, include: bool) -> Self {
        self.include_source_nodes = include;
        self
    }

    pub fn chunk_size(mut self, chunk_size: i64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn missing_target_policy(mut self, policy: MissingTargetPolicy) -> Self {
        self.missing_target_policy = policy;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.chunk_size < 1 {
            return Err(ConfigError::range(
                "chunk_size",
                self.chunk_size,
                "Must be at least 1.",
            ));
        }
        if self.progress_interval < 1 {
            return Err(ConfigError::range(
                "progress_interval",
                self.progress_interval,
                "Must be at least 1.",
            ));
        }
        Ok(())
    }

    /// Load a versioned YAML settings file over the defaults
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let file: SettingsFileV1 = serde_yaml::from_str(&text)?;
        Self::default().apply(file)
    }

    fn apply(mut self, file: SettingsFileV1) -> ConfigResult<Self> {
        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        if let Some(include) = file.include_source_nodes {
            self.include_source_nodes = include;
        }
        if let Some(chunk_size) = file.chunk_size {
            self.chunk_size = chunk_size;
        }
        if let Some(interval) = file.progress_interval {
            self.progress_interval = interval;
        }
        if let Some(policy) = file.missing_target_policy {
            self.missing_target_policy = policy;
        }

        self.validate()?;
        Ok(self)
    }
}

/// Base path for output files: an existing directory gets a trailing
/// separator, anything else is used as a file name prefix
pub fn resolve_output_base(output_path: &str) -> PathBuf {
    if Path::new(output_path).is_dir() && !output_path.ends_with(MAIN_SEPARATOR) {
        PathBuf::from(format!("{}{}", output_path, MAIN_SEPARATOR))
    } else {
        PathBuf::from(output_path)
    }
}
