// Graph Builder Infrastructure
//
// Entity pass (nodes, Resolved + Disclosed edges) and relationship pass
// (Derived edges)

pub mod entity_builder;
pub mod relationship_builder;

pub use entity_builder::EntityGraphBuilder;
pub use relationship_builder::{
    match_level_label, primary_match_level, strip_rel_pointers, RelationshipGraphBuilder,
};
