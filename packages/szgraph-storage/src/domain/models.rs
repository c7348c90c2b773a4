//! Row models read from the entity resolution repository

use serde::{Deserialize, Serialize};

/// Resolved entity identifier (`RES_ENT_ID`)
pub type EntityId = i64;

/// Data source identifier (`DSRC_ID`)
pub type DataSourceId = i64;

/// One source record together with the entity it resolved to
///
/// Rows for an id range are returned ordered by `entity_id`, so all members
/// of one resolved entity are contiguous.
///
/// # Examples
///
/// ```rust
/// use szgraph_storage::domain::RecordRow;
///
/// let row = RecordRow::new(1, 7, "CUSTOMERS", "1001", r#"{"NAME_FULL": "JOHN SMITH"}"#);
/// assert_eq!(row.data_source, "CUSTOMERS");
/// assert!(row.match_key.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
    /// Resolved entity the record belongs to
    pub entity_id: EntityId,
    /// Numeric data source id (used for existence probes)
    pub data_source_id: DataSourceId,
    /// Data source code (e.g. `CUSTOMERS`)
    pub data_source: String,
    /// Record id, unique within its data source
    pub record_id: String,
    /// Match key that brought the record into the entity
    #[serde(default)]
    pub match_key: Option<String>,
    /// Raw JSON payload as loaded
    pub json_data: String,
}

impl RecordRow {
    pub fn new(
        entity_id: EntityId,
        data_source_id: DataSourceId,
        data_source: impl Into<String>,
        record_id: impl Into<String>,
        json_data: impl Into<String>,
    ) -> Self {
        Self {
            entity_id,
            data_source_id,
            data_source: data_source.into(),
            record_id: record_id.into(),
            match_key: None,
            json_data: json_data.into(),
        }
    }

    pub fn with_match_key(mut self, match_key: impl Into<String>) -> Self {
        self.match_key = Some(match_key.into());
        self
    }
}

/// Derived relationship between two resolved entities
///
/// Stored once per pair (`entity_id < related_entity_id`). `match_levels` is a
/// comma-separated list such as `"2"` or `"2,11"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRow {
    pub entity_id: EntityId,
    pub related_entity_id: EntityId,
    pub match_levels: String,
    pub match_key: String,
}

impl RelationshipRow {
    pub fn new(
        entity_id: EntityId,
        related_entity_id: EntityId,
        match_levels: impl Into<String>,
        match_key: impl Into<String>,
    ) -> Self {
        Self {
            entity_id,
            related_entity_id,
            match_levels: match_levels.into(),
            match_key: match_key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_row_with_match_key() {
        let row = RecordRow::new(5, 1, "WATCHLIST", "W-1", "{}").with_match_key("+NAME+DOB");
        assert_eq!(row.entity_id, 5);
        assert_eq!(row.match_key.as_deref(), Some("+NAME+DOB"));
    }

    #[test]
    fn test_relationship_row_serde() {
        let rel = RelationshipRow::new(1, 2, "2", "+NAME");
        let json = serde_json::to_string(&rel).unwrap();
        let back: RelationshipRow = serde_json::from_str(&json).unwrap();
        assert_eq!(rel, back);
    }
}
