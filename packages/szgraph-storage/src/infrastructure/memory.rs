//! In-Memory Repository (for testing)
//!
//! Vec-backed implementation of every port, mirroring the SQLite adapter's
//! ordering and filtering rules. NOT for production use.
use std::cell::Cell;

use crate::domain::models::{DataSourceId, EntityId, RecordRow, RelationshipRow};
use crate::domain::ports::{RecordProbe, RecordSource, RelationshipSource, SchemaSource};
use crate::{Result, StorageError};

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    records: Vec<RecordRow>,
    relationships: Vec<RelationshipRow>,
    config: Option<serde_json::Value>,
    probes: Cell<usize>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, record: RecordRow) -> Self {
        self.records.push(record);
        self
    }

    pub fn with_relationship(mut self, relationship: RelationshipRow) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }

    /// Number of existence probes answered so far
    pub fn probe_count(&self) -> usize {
        self.probes.get()
    }
}

impl RecordSource for InMemoryRepository {
    fn max_entity_id(&self) -> Result<Option<EntityId>> {
        Ok(self.records.iter().map(|r| r.entity_id).max())
    }

    fn records_in_range(&self, begin: EntityId, end: EntityId) -> Result<Vec<RecordRow>> {
        let mut rows: Vec<RecordRow> = self
            .records
            .iter()
            .filter(|r| r.entity_id >= begin && r.entity_id <= end)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.entity_id);
        Ok(rows)
    }
}

impl RecordProbe for InMemoryRepository {
    fn record_exists(&self, data_source_id: DataSourceId, record_id: &str) -> Result<bool> {
        self.probes.set(self.probes.get() + 1);
        Ok(self
            .records
            .iter()
            .any(|r| r.data_source_id == data_source_id && r.record_id == record_id))
    }
}

impl RelationshipSource for InMemoryRepository {
    fn for_each_relationship(&self, visit: &mut dyn FnMut(RelationshipRow)) -> Result<u64> {
        let mut count = 0;
        for rel in self.relationships.iter().filter(|r| r.match_levels != "11") {
            visit(rel.clone());
            count += 1;
        }
        Ok(count)
    }
}

impl SchemaSource for InMemoryRepository {
    fn engine_config(&self) -> Result<serde_json::Value> {
        self.config.clone().ok_or_else(StorageError::config_not_found)
    }
}
