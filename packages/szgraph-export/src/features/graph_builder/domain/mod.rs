// Graph Builder Domain Models
//
// Node-link graph documents (the layout graph tools read as "node_link_data"):
// resolved-entity and source-record nodes, Resolved / Disclosed / Derived edges.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use szgraph_storage::EntityId;

// ============================================================
// Node / Edge Classes
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeClass {
    Record,
    Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EdgeClass {
    /// Record → the entity it resolved into
    Resolved,
    /// Record → record, asserted by a relationship pointer in the source data
    Disclosed,
    /// Entity → entity, computed by the resolution process
    Derived,
}

// ============================================================
// Dynamic Record Fields
// ============================================================

/// Value of a dynamic record field: scalar until a second value arrives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    /// Append a value, promoting a scalar to a list (first value kept)
    pub fn push(&mut self, value: String) {
        match self {
            FieldValue::Single(first) => {
                let first = std::mem::take(first);
                *self = FieldValue::Multiple(vec![first, value]);
            }
            FieldValue::Multiple(values) => values.push(value),
        }
    }
}

/// Insertion-ordered dynamic fields of a record node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    entries: Vec<(String, FieldValue)>,
}

impl RecordFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => existing.push(value),
            None => self.entries.push((key, FieldValue::Single(value))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// ============================================================
// Graph Node
// ============================================================

/// Keys written by the node itself; dynamic fields may not reuse them
pub const RESERVED_NODE_KEYS: &[&str] = &[
    "id",
    "node_class",
    "node_type",
    "node_name",
    "data_source",
    "record_id",
    "entity_id",
    "record_count",
    "data_sources",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeDetails {
    Record {
        data_source: String,
        record_id: String,
        fields: RecordFields,
    },
    Entity {
        entity_id: EntityId,
        record_count: usize,
        /// Records per data source, first-seen order
        data_sources: Vec<(String, usize)>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub node_type: String,
    pub node_name: String,
    pub details: NodeDetails,
}

impl GraphNode {
    pub fn node_class(&self) -> NodeClass {
        match self.details {
            NodeDetails::Record { .. } => NodeClass::Record,
            NodeDetails::Entity { .. } => NodeClass::Entity,
        }
    }
}

/// One-key map, e.g. `{"CUSTOMERS": 2}`
struct Tally<'a>(&'a str, usize);

impl Serialize for Tally<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, &self.1)?;
        map.end()
    }
}

impl Serialize for GraphNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("node_class", &self.node_class())?;
        map.serialize_entry("node_type", &self.node_type)?;
        map.serialize_entry("node_name", &self.node_name)?;
        match &self.details {
            NodeDetails::Record {
                data_source,
                record_id,
                fields,
            } => {
                map.serialize_entry("data_source", data_source)?;
                map.serialize_entry("record_id", record_id)?;
                for (key, value) in fields.iter() {
                    map.serialize_entry(key, value)?;
                }
            }
            NodeDetails::Entity {
                entity_id,
                record_count,
                data_sources,
            } => {
                map.serialize_entry("entity_id", entity_id)?;
                map.serialize_entry("record_count", record_count)?;
                let tallies: Vec<Tally<'_>> = data_sources
                    .iter()
                    .map(|(ds, n)| Tally(ds.as_str(), *n))
                    .collect();
                map.serialize_entry("data_sources", &tallies)?;
            }
        }
        map.end()
    }
}

// ============================================================
// Graph Edge
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub edge_class: EdgeClass,
    pub edge_type: String,
    pub edge_details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
}

impl GraphEdge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        edge_class: EdgeClass,
        edge_type: impl Into<String>,
        edge_details: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            edge_class,
            edge_type: edge_type.into(),
            edge_details: edge_details.into(),
            data_source: None,
        }
    }

    pub fn with_data_source(mut self, data_source: impl Into<String>) -> Self {
        self.data_source = Some(data_source.into());
        self
    }

    /// Same edge with source and target swapped
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            ..self.clone()
        }
    }
}

// ============================================================
// Graph Document
// ============================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphDocument {
    pub directed: bool,
    pub multigraph: bool,
    pub graph: serde_json::Map<String, serde_json::Value>,
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphEdge>,
}

impl GraphDocument {
    fn empty(directed: bool, multigraph: bool) -> Self {
        Self {
            directed,
            multigraph,
            graph: serde_json::Map::new(),
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Entity graph: undirected, one edge per pair
    pub fn resolved() -> Self {
        Self::empty(false, false)
    }

    /// Source record graph: directed, parallel edges allowed
    pub fn source() -> Self {
        Self::empty(true, true)
    }

    pub fn add_node(&mut self, node: GraphNode) {
        self.nodes.push(node);
    }

    pub fn add_link(&mut self, edge: GraphEdge) {
        self.links.push(edge);
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn links_of_class(&self, class: EdgeClass) -> impl Iterator<Item = &GraphEdge> {
        self.links.iter().filter(move |e| e.edge_class == class)
    }
}

// ============================================================
// Export Accumulator
// ============================================================

/// Prefix of resolved entity node ids
pub const ENTITY_NODE_PREFIX: &str = "SENZING";

/// `SENZING:<entity_id>`
pub fn entity_node_id(entity_id: EntityId) -> String {
    format!("{}:{}", ENTITY_NODE_PREFIX, entity_id)
}

/// Counters reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub entities: u64,
    pub records: u64,
    pub relationships: u64,
    pub resolved_edges: u64,
    pub disclosed_edges: u64,
    pub derived_edges: u64,
    /// Disclosed pointers dropped because the target record does not exist
    pub missing_pointer_targets: u64,
}

/// The two documents of one export run plus its counters
///
/// The source graph exists only when source record nodes are included.
#[derive(Debug, Clone)]
pub struct ExportGraphs {
    pub resolved: GraphDocument,
    pub source: Option<GraphDocument>,
    pub stats: GraphStats,
}

impl ExportGraphs {
    pub fn new(include_source_nodes: bool) -> Self {
        Self {
            resolved: GraphDocument::resolved(),
            source: include_source_nodes.then(GraphDocument::source),
            stats: GraphStats::default(),
        }
    }

    pub fn includes_source_nodes(&self) -> bool {
        self.source.is_some()
    }

    /// `<data_source>:<record_id>` with source nodes, bare record id without
    pub fn record_node_id(&self, data_source: &str, record_id: &str) -> String {
        if self.includes_source_nodes() {
            format!("{}:{}", data_source, record_id)
        } else {
            record_id.to_string()
        }
    }
}
