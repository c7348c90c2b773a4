// Attribute Schema Catalog
//
// Code → definition lookup built once from the engine configuration and
// shared read-only by every classification afterwards.

use ahash::AHashMap;
use std::path::Path;
use szgraph_storage::SchemaSource;
use tracing::info;

use super::domain::AttributeDefinition;
use crate::errors::{ExportError, Result};

/// Immutable attribute dictionary keyed by `ATTR_CODE`
#[derive(Debug, Clone, Default)]
pub struct AttributeCatalog {
    by_code: AHashMap<String, AttributeDefinition>,
}

impl AttributeCatalog {
    /// Build from definitions (later duplicates replace earlier ones)
    pub fn from_definitions(definitions: impl IntoIterator<Item = AttributeDefinition>) -> Self {
        let by_code = definitions
            .into_iter()
            .map(|def| (def.attr_code.clone(), def))
            .collect();
        Self { by_code }
    }

    /// Build from an engine configuration document (`G2_CONFIG.CFG_ATTR`)
    pub fn from_engine_config(config: &serde_json::Value) -> Result<Self> {
        let entries = config
            .get("G2_CONFIG")
            .and_then(|cfg| cfg.get("CFG_ATTR"))
            .and_then(|attrs| attrs.as_array())
            .ok_or_else(|| {
                ExportError::config("engine configuration has no G2_CONFIG.CFG_ATTR list")
            })?;

        let definitions = entries
            .iter()
            .map(|entry| {
                serde_json::from_value::<AttributeDefinition>(entry.clone())
                    .map_err(|e| ExportError::config(format!("invalid CFG_ATTR entry: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_definitions(definitions))
    }

    /// Load from an exported engine configuration JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExportError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            ExportError::config(format!("cannot parse {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_engine_config(&config)?;
        info!("loaded {} attribute definitions from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Load from the configuration stored alongside the data
    pub fn load(source: &dyn SchemaSource) -> Result<Self> {
        let config = source
            .engine_config()
            .map_err(|e| ExportError::config(format!("cannot fetch attribute schema: {}", e)))?;
        let catalog = Self::from_engine_config(&config)?;
        info!("loaded {} attribute definitions from repository", catalog.len());
        Ok(catalog)
    }

    pub fn get(&self, code: &str) -> Option<&AttributeDefinition> {
        self.by_code.get(code)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}
