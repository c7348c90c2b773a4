/*
 * szgraph-export - Entity Resolution Graph Export
 *
 * Reads resolved entities, their source records and derived relationships
 * from the resolution engine's repository and writes node-link graph
 * documents for graph tools.
 *
 * Layout:
 * - config/   : engine settings, export settings (YAML)
 * - features/ : attribute classification, graph building
 * - pipeline/ : chunked export driver, document writer
 */

pub mod config;
pub mod errors;
pub mod features;
pub mod pipeline;

pub use config::{resolve_output_base, EngineSettings, ExportConfig, MissingTargetPolicy};
pub use errors::{ExportError, Result};
pub use features::attributes::{AttributeCatalog, AttributeClassifier, AttributeDefinition};
pub use features::graph_builder::{
    EdgeClass, EntityGraphBuilder, ExportGraphs, GraphDocument, GraphStats, NodeClass,
    RelationshipGraphBuilder,
};
pub use pipeline::{DocumentWriter, ExportDriver};
