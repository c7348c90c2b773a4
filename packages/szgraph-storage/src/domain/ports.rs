//! Repository Ports (Trait Interfaces)
//!
//! Port/Adapter pattern for the export pipeline:
//! - Production: SQLite (the resolution engine's own database)
//! - Testing: InMemory (fast unit tests, no schema needed)
//!
//! Every call is synchronous and blocking; the exporter is a single pass.

use super::models::{DataSourceId, EntityId, RecordRow, RelationshipRow};
use crate::Result;

/// Paginated access to resolved records
pub trait RecordSource {
    /// Highest resolved entity id, `None` when nothing has been resolved
    fn max_entity_id(&self) -> Result<Option<EntityId>>;

    /// All member records of entities with `begin <= entity_id <= end`,
    /// ordered by entity id
    fn records_in_range(&self, begin: EntityId, end: EntityId) -> Result<Vec<RecordRow>>;
}

/// Existence check for records named by disclosed relationship pointers
///
/// Kept separate from [`RecordSource`] so graph construction only depends on
/// this one live lookup.
pub trait RecordProbe {
    fn record_exists(&self, data_source_id: DataSourceId, record_id: &str) -> Result<bool>;
}

/// Single unchunked pass over derived relationships
pub trait RelationshipSource {
    /// Visit every relationship not made solely of disclosed (`11`) matches.
    ///
    /// Returns the number of rows visited.
    fn for_each_relationship(&self, visit: &mut dyn FnMut(RelationshipRow)) -> Result<u64>;
}

/// Access to the engine configuration document stored with the data
pub trait SchemaSource {
    /// The active configuration document (contains `G2_CONFIG.CFG_ATTR`)
    fn engine_config(&self) -> Result<serde_json::Value>;
}
