//! szgraph-storage - Entity Resolution Repository Access
//!
//! Read-only access to the relational store written by the entity
//! resolution engine: resolved entity membership, record payloads,
//! derived relationships and the stored engine configuration.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use szgraph_storage::{RecordSource, SqliteRepository};
//!
//! let repo = SqliteRepository::open("/var/opt/senzing/sqlite/G2C.db")?;
//! if let Some(max) = repo.max_entity_id()? {
//!     for row in repo.records_in_range(1, max)? {
//!         println!("{} {}:{}", row.entity_id, row.data_source, row.record_id);
//!     }
//! }
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, Result, StorageError};

pub use domain::{
    DataSourceId, EntityId, RecordProbe, RecordRow, RecordSource, RelationshipRow,
    RelationshipSource, SchemaSource,
};

pub use infrastructure::InMemoryRepository;
#[cfg(feature = "sqlite")]
pub use infrastructure::SqliteRepository;
