//! Infrastructure layer - Repository adapters
//!
//! - SQLite: the resolution engine's database file
//! - InMemory: test double

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::InMemoryRepository;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
