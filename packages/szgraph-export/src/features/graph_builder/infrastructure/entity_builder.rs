// Entity Graph Builder - Resolved Entity → Nodes + Edges
//
// One call per resolved entity:
// - RECORD node per member (source graph only)
// - Disclosed edges from relationship pointers (source graph only, probed)
// - Resolved edge record → entity
// - ENTITY node with name, type set and per data source tallies

use std::collections::BTreeSet;

use szgraph_storage::{EntityId, RecordProbe, RecordRow};
use tracing::{debug, warn};

use crate::config::MissingTargetPolicy;
use crate::errors::{ExportError, Result};
use crate::features::attributes::domain::{ftype, GroupedAttribute};
use crate::features::attributes::{AttributeCatalog, AttributeClassifier};
use crate::features::graph_builder::domain::{
    entity_node_id, EdgeClass, ExportGraphs, GraphEdge, GraphNode, NodeDetails, RecordFields,
    RESERVED_NODE_KEYS,
};

/// Attributes that identify or administer a record rather than describe it
const ADMIN_ATTRIBUTES: &[&str] = &[
    ftype::DATA_SOURCE,
    ftype::RECORD_ID,
    ftype::REL_ANCHOR,
    ftype::LOAD_ID,
];

const PRIMARY_USAGE: &str = "PRIMARY";
const DEFAULT_ROLE: &str = "RELATED_TO";
const UNKNOWN_RECORD_TYPE: &str = "UNKNOWN";
const UNNAMED_RECORD: &str = "n/a";

pub const RESOLVED_EDGE_TYPE: &str = "Resolved to";
pub const RESOLVED_EDGE_DETAILS: &str =
    "Use Senzing's whyRecordInEntity call to get current details";

/// Longest PRIMARY name, and separately the longest of every other name.
/// Only a strictly longer value replaces the current one.
#[derive(Debug, Default)]
struct NameTracker {
    primary: Option<String>,
    fallback: Option<String>,
}

impl NameTracker {
    fn observe(&mut self, usage_type: Option<&str>, value: &str) {
        let slot = if usage_type == Some(PRIMARY_USAGE) {
            &mut self.primary
        } else {
            &mut self.fallback
        };
        let current = slot.as_deref().map_or(0, |s| s.chars().count());
        if value.chars().count() > current {
            *slot = Some(value.to_string());
        }
    }

    fn best(&self) -> Option<&str> {
        self.primary.as_deref().or(self.fallback.as_deref())
    }
}

/// What one member record contributes to its entity
struct RecordSummary {
    record_type: Option<String>,
    names: NameTracker,
    fields: RecordFields,
}

pub struct EntityGraphBuilder<'a> {
    classifier: AttributeClassifier<'a>,
    probe: &'a dyn RecordProbe,
    missing_target_policy: MissingTargetPolicy,
}

impl<'a> EntityGraphBuilder<'a> {
    pub fn new(catalog: &'a AttributeCatalog, probe: &'a dyn RecordProbe) -> Self {
        Self {
            classifier: AttributeClassifier::new(catalog),
            probe,
            missing_target_policy: MissingTargetPolicy::default(),
        }
    }

    pub fn with_missing_target_policy(mut self, policy: MissingTargetPolicy) -> Self {
        self.missing_target_policy = policy;
        self
    }

    /// Add one resolved entity and its member records to the graphs
    pub fn build(
        &self,
        entity_id: EntityId,
        records: &[RecordRow],
        graphs: &mut ExportGraphs,
    ) -> Result<()> {
        let entity_node = entity_node_id(entity_id);
        let mut entity_names = NameTracker::default();
        let mut entity_types = BTreeSet::new();
        let mut tallies: Vec<(String, usize)> = Vec::new();

        for row in records {
            match tallies.iter_mut().find(|(ds, _)| *ds == row.data_source) {
                Some((_, count)) => *count += 1,
                None => tallies.push((row.data_source.clone(), 1)),
            }

            let record_node = graphs.record_node_id(&row.data_source, &row.record_id);
            let summary = self.summarize(entity_id, row, &record_node, &mut entity_names, graphs)?;
            if let Some(record_type) = &summary.record_type {
                entity_types.insert(record_type.clone());
            }

            if let Some(source) = graphs.source.as_mut() {
                source.add_node(GraphNode {
                    id: record_node.clone(),
                    node_type: summary
                        .record_type
                        .unwrap_or_else(|| UNKNOWN_RECORD_TYPE.to_string()),
                    node_name: summary.names.best().unwrap_or(UNNAMED_RECORD).to_string(),
                    details: NodeDetails::Record {
                        data_source: row.data_source.clone(),
                        record_id: row.record_id.clone(),
                        fields: summary.fields,
                    },
                });
            }

            graphs.resolved.add_link(GraphEdge::new(
                record_node,
                entity_node.clone(),
                EdgeClass::Resolved,
                RESOLVED_EDGE_TYPE,
                RESOLVED_EDGE_DETAILS,
            ));
            graphs.stats.records += 1;
            graphs.stats.resolved_edges += 1;
        }

        graphs.resolved.add_node(GraphNode {
            id: entity_node,
            node_type: entity_types.into_iter().collect::<Vec<_>>().join(", "),
            node_name: entity_names.best().unwrap_or_default().to_string(),
            details: NodeDetails::Entity {
                entity_id,
                record_count: records.len(),
                data_sources: tallies,
            },
        });
        graphs.stats.entities += 1;

        Ok(())
    }

    fn summarize(
        &self,
        entity_id: EntityId,
        row: &RecordRow,
        record_node: &str,
        entity_names: &mut NameTracker,
        graphs: &mut ExportGraphs,
    ) -> Result<RecordSummary> {
        let mut attributes = self.classifier.parse(&row.json_data).map_err(|e| match e {
            ExportError::PayloadParse(msg) => ExportError::payload(format!(
                "entity {} record {}:{}: {}",
                entity_id, row.data_source, row.record_id, msg
            )),
            other => other,
        })?;
        attributes.sort_by_key(|a| a.attr_id);

        let mut summary = RecordSummary {
            record_type: None,
            names: NameTracker::default(),
            fields: RecordFields::new(),
        };

        for attr in attributes {
            if ADMIN_ATTRIBUTES.contains(&attr.attribute.as_str()) {
                continue;
            }

            match attr.attribute.as_str() {
                ftype::REL_POINTER => {
                    if graphs.includes_source_nodes() {
                        self.disclose(row, record_node, &attr, graphs)?;
                    }
                }
                ftype::RECORD_TYPE => {
                    summary.record_type = Some(attr.value);
                }
                _ => {
                    if attr.attribute == ftype::NAME {
                        summary.names.observe(attr.usage_type.as_deref(), &attr.value);
                        entity_names.observe(attr.usage_type.as_deref(), &attr.value);
                    }
                    summary.fields.insert(field_key(&attr), attr.value);
                }
            }
        }

        Ok(summary)
    }

    /// Disclosed edge for a relationship pointer, if the target record exists
    fn disclose(
        &self,
        row: &RecordRow,
        record_node: &str,
        attr: &GroupedAttribute,
        graphs: &mut ExportGraphs,
    ) -> Result<()> {
        let related_record_id = attr.value.as_str();
        let role = attr
            .usage_type
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(DEFAULT_ROLE);

        if !self.probe.record_exists(row.data_source_id, related_record_id)? {
            graphs.stats.missing_pointer_targets += 1;
            debug!(
                data_source = %row.data_source,
                record_id = %row.record_id,
                related_record_id,
                role,
                "Disclosed relationship target not found, edge dropped"
            );
            if self.missing_target_policy == MissingTargetPolicy::Warn {
                warn!(
                    "{}:{} points at missing record {}:{} ({})",
                    row.data_source, row.record_id, row.data_source, related_record_id, role
                );
            }
            return Ok(());
        }

        let target = graphs.record_node_id(&row.data_source, related_record_id);
        let edge_type = role.split_whitespace().next().unwrap_or(DEFAULT_ROLE);
        let edge = GraphEdge::new(
            record_node,
            target,
            EdgeClass::Disclosed,
            edge_type,
            format!("{}: {}", row.data_source, role),
        )
        .with_data_source(row.data_source.as_str());

        if let Some(source) = graphs.source.as_mut() {
            source.add_link(edge);
            graphs.stats.disclosed_edges += 1;
        }
        Ok(())
    }
}

/// `<usage>_<attribute>` or `<attribute>`, lower-cased; names the node
/// writes itself get an `attr_` prefix
fn field_key(attr: &GroupedAttribute) -> String {
    let key = match attr.usage_type.as_deref() {
        Some(usage) if !usage.is_empty() => format!("{}_{}", usage, attr.attribute),
        _ => attr.attribute.clone(),
    }
    .to_lowercase();

    if RESERVED_NODE_KEYS.contains(&key.as_str()) {
        format!("attr_{}", key)
    } else {
        key
    }
}
