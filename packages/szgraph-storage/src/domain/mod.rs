//! Domain layer for the entity resolution repository
//!
//! # Domain Models
//!
//! - `RecordRow`: a source record and the entity it resolved to
//! - `RelationshipRow`: a derived relationship between two entities
//!
//! # Port Traits
//!
//! - `RecordSource`: chunked record reads + max entity id
//! - `RecordProbe`: record existence lookups
//! - `RelationshipSource`: streaming relationship reads
//! - `SchemaSource`: stored engine configuration

pub mod models;
pub mod ports;

pub use models::{DataSourceId, EntityId, RecordRow, RelationshipRow};
pub use ports::{RecordProbe, RecordSource, RelationshipSource, SchemaSource};
