//! Settings file I/O (YAML)
//!
//! ```yaml
//! version: 1
//! include_source_nodes: true
//! chunk_size: 500000
//! progress_interval: 100000
//! missing_target_policy: warn
//! ```

use serde::{Deserialize, Serialize};

use super::MissingTargetPolicy;

pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_source_nodes: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_interval: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_target_policy: Option<MissingTargetPolicy>,
}
