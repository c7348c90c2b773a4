// Graph Builder - Resolved Entities → Node-Link Documents
//
// ## Architecture
// - Domain: documents, nodes, edges, run counters
// - Infrastructure: entity builder + relationship builder
//
// Output:
// - resolved graph: ENTITY nodes, Resolved + Derived edges
// - source graph (optional): RECORD nodes, Disclosed edges

pub mod domain;
pub mod infrastructure;

pub use domain::{
    entity_node_id, EdgeClass, ExportGraphs, FieldValue, GraphDocument, GraphEdge, GraphNode,
    GraphStats, NodeClass, NodeDetails, RecordFields,
};
pub use infrastructure::{EntityGraphBuilder, RelationshipGraphBuilder};
