// Relationship Graph Builder - Derived Relationships → Entity Edges
//
// Each relationship row becomes a pair of Derived edges (A→B, B→A) with the
// same label and details, so either endpoint can reach the other.

use once_cell::sync::Lazy;
use regex::Regex;
use szgraph_storage::RelationshipRow;

use crate::features::graph_builder::domain::{entity_node_id, EdgeClass, ExportGraphs, GraphEdge};

/// Match level of relationships disclosed by the source data
pub const DISCLOSED_MATCH_LEVEL: &str = "11";

static REL_POINTER_ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+REL_POINTER\([^)]*\)").expect("valid REL_POINTER pattern"));

/// First match level that is not the disclosed level
///
/// A leading `11` is skipped, so `"11,3"` labels as level 3 rather than
/// falling through to "Other".
pub fn primary_match_level(match_levels: &str) -> Option<&str> {
    match_levels
        .split(',')
        .map(str::trim)
        .find(|level| !level.is_empty() && *level != DISCLOSED_MATCH_LEVEL)
}

pub fn match_level_label(level: &str) -> &'static str {
    match level {
        "2" => "Possible Match",
        "3" => "Possibly Related",
        _ => "Other",
    }
}

/// Remove every `+REL_POINTER(...)` annotation from a match key
pub fn strip_rel_pointers(match_key: &str) -> String {
    let mut stripped = match_key.to_string();
    while REL_POINTER_ANNOTATION.is_match(&stripped) {
        stripped = REL_POINTER_ANNOTATION.replace_all(&stripped, "").into_owned();
    }
    stripped
}

#[derive(Debug, Default)]
pub struct RelationshipGraphBuilder;

impl RelationshipGraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Add the Derived edges of one relationship to the resolved graph.
    ///
    /// Returns the number of edges added (0 or 2).
    pub fn build(&self, relationship: &RelationshipRow, graphs: &mut ExportGraphs) -> usize {
        graphs.stats.relationships += 1;

        let Some(level) = primary_match_level(&relationship.match_levels) else {
            return 0;
        };

        let forward = GraphEdge::new(
            entity_node_id(relationship.entity_id),
            entity_node_id(relationship.related_entity_id),
            EdgeClass::Derived,
            match_level_label(level),
            strip_rel_pointers(&relationship.match_key),
        );
        let backward = forward.reversed();

        graphs.resolved.add_link(forward);
        graphs.resolved.add_link(backward);
        graphs.stats.derived_edges += 2;
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_primary_match_level() {
        assert_eq!(primary_match_level("2"), Some("2"));
        assert_eq!(primary_match_level("3,2"), Some("3"));
        assert_eq!(primary_match_level("11,3"), Some("3"));
        assert_eq!(primary_match_level("11"), None);
        assert_eq!(primary_match_level(""), None);
    }

    #[test]
    fn test_match_level_labels() {
        assert_eq!(match_level_label("2"), "Possible Match");
        assert_eq!(match_level_label("3"), "Possibly Related");
        assert_eq!(match_level_label("4"), "Other");
        assert_eq!(match_level_label("1"), "Other");
    }

    #[test]
    fn test_strip_rel_pointers() {
        assert_eq!(
            strip_rel_pointers("+NAME+ADDRESS+REL_POINTER(SPOUSE:)"),
            "+NAME+ADDRESS"
        );
        assert_eq!(
            strip_rel_pointers("+REL_POINTER(OWNER:OWNED_BY)+PHONE+REL_POINTER(:)"),
            "+PHONE"
        );
        assert_eq!(strip_rel_pointers("+NAME-DOB"), "+NAME-DOB");
        assert_eq!(
            strip_rel_pointers("+REL_POINTER(A+REL_POINTER(B))"),
            ")"
        );
    }

    #[test]
    fn test_leading_disclosed_level_skipped() {
        let mut graphs = ExportGraphs::new(false);
        let row = RelationshipRow::new(4, 9, "11,3", "+REL_POINTER(EMPLOYER:)+ADDRESS");
        assert_eq!(RelationshipGraphBuilder::new().build(&row, &mut graphs), 2);
        assert!(graphs
            .resolved
            .links
            .iter()
            .all(|e| e.edge_type == "Possibly Related" && e.edge_details == "+ADDRESS"));
    }

    #[test]
    fn test_possible_match_yields_both_directions() {
        let mut graphs = ExportGraphs::new(false);
        let added = RelationshipGraphBuilder::new()
            .build(&RelationshipRow::new(1, 2, "2", "+NAME+DOB"), &mut graphs);
        assert_eq!(added, 2);

        let derived: Vec<_> = graphs.resolved.links_of_class(EdgeClass::Derived).collect();
        assert_eq!(derived.len(), 2);
        assert_eq!((derived[0].source.as_str(), derived[0].target.as_str()), ("SENZING:1", "SENZING:2"));
        assert_eq!((derived[1].source.as_str(), derived[1].target.as_str()), ("SENZING:2", "SENZING:1"));
        for edge in derived {
            assert_eq!(edge.edge_type, "Possible Match");
            assert_eq!(edge.edge_details, "+NAME+DOB");
        }
        assert_eq!(graphs.stats.derived_edges, 2);
    }

    #[test]
    fn test_disclosed_only_relationship_has_no_edges() {
        let mut graphs = ExportGraphs::new(true);
        let added = RelationshipGraphBuilder::new()
            .build(&RelationshipRow::new(1, 2, "11", "+REL_POINTER(SPOUSE:)"), &mut graphs);
        assert_eq!(added, 0);
        assert!(graphs.resolved.links.is_empty());
        assert_eq!(graphs.stats.relationships, 1);
    }

    proptest! {
        #[test]
        fn prop_strip_is_idempotent(s in r"(\+[A-Z_]{1,8}|\+REL_POINTER\([A-Z:]{0,8}\)|[()]){0,8}") {
            let once = strip_rel_pointers(&s);
            prop_assert_eq!(strip_rel_pointers(&once), once);
        }
    }
}
