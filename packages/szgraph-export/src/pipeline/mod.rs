//! Pipeline orchestration

pub mod export_driver;
pub mod writer;

pub use export_driver::{elapsed_minutes, entity_ranges, ExportDriver};
pub use writer::{DocumentWriter, RESOLVED_GRAPH_FILE, SOURCE_GRAPH_FILE};
