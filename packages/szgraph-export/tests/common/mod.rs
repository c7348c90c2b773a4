//! Common test utilities for szgraph-export
//!
//! Shared attribute dictionary, record builders and a seeded SQLite
//! repository for integration tests.

#![allow(dead_code)]

mod builders;
mod fixtures;

pub use builders::*;
pub use fixtures::*;
