// Attribute Classifier - Raw Payload → Grouped Attributes
//
// 1. Walk the payload: top-level scalars belong to ROOT, each element of a
//    top-level list is its own segment (`<KEY>-<n>`, 1-based).
// 2. Classify every field name against the catalog (exact, prefix label,
//    suffix label, synthetic - first hit wins).
// 3. Group by (segment, feature type, usage type) and merge each group in
//    attr id order.

use ahash::AHashMap;
use serde_json::{Map, Value};

use super::catalog::AttributeCatalog;
use super::domain::{
    felem, ftype, AttributeDefinition, ClassifiedAttribute, GroupedAttribute, ROOT_SEGMENT,
    SYNTHETIC_ATTR_ID,
};
use crate::errors::{ExportError, Result};

/// Outcome of label inference for one upper-cased field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelMatch<'a> {
    /// Field name is a catalog code
    Exact(&'a AttributeDefinition),
    /// `<LABEL>_<CODE>`, split at the first underscore
    Prefixed(&'a AttributeDefinition, String),
    /// `<CODE>_<LABEL>`, split at the last underscore
    Suffixed(&'a AttributeDefinition, String),
    /// Not recognised
    Unknown,
}

pub struct AttributeClassifier<'a> {
    catalog: &'a AttributeCatalog,
}

impl<'a> AttributeClassifier<'a> {
    pub fn new(catalog: &'a AttributeCatalog) -> Self {
        Self { catalog }
    }

    /// Parse a JSON payload into grouped attributes
    pub fn parse(&self, json_text: &str) -> Result<Vec<GroupedAttribute>> {
        let payload: Value = serde_json::from_str(json_text)
            .map_err(|e| ExportError::payload(format!("invalid JSON: {}", e)))?;
        self.parse_value(&payload)
    }

    /// Parse an already-decoded payload into grouped attributes
    pub fn parse_value(&self, payload: &Value) -> Result<Vec<GroupedAttribute>> {
        let fields = payload
            .as_object()
            .ok_or_else(|| ExportError::payload("payload is not a JSON object"))?;

        let mut groups = AttributeGroups::default();
        for (key, value) in fields.iter().filter(|(_, v)| is_present(v)) {
            match value {
                Value::Array(children) => {
                    for (index, child) in children.iter().enumerate() {
                        let child = child.as_object().ok_or_else(|| {
                            ExportError::payload(format!(
                                "element {} of '{}' is not a JSON object",
                                index + 1,
                                key
                            ))
                        })?;
                        let segment = format!("{}-{}", key, index + 1);
                        self.classify_fields(&segment, child, &mut groups);
                    }
                }
                _ => groups.push(self.classify(ROOT_SEGMENT, key, value_text(value))),
            }
        }

        Ok(groups.merge())
    }

    fn classify_fields(&self, segment: &str, fields: &Map<String, Value>, groups: &mut AttributeGroups) {
        for (key, value) in fields.iter().filter(|(_, v)| is_present(v)) {
            groups.push(self.classify(segment, key, value_text(value)));
        }
    }

    /// Classify one field. Never fails: unknown names get a synthetic definition.
    pub fn classify(&self, segment: &str, field_key: &str, value: String) -> ClassifiedAttribute {
        let name = field_key.to_uppercase();
        let synthetic;
        let (def, usage_type) = match self.infer_label(&name) {
            LabelMatch::Exact(def) => (def, None),
            LabelMatch::Prefixed(def, label) | LabelMatch::Suffixed(def, label) => {
                (def, Some(label).filter(|l| !l.is_empty()))
            }
            LabelMatch::Unknown => {
                synthetic = AttributeDefinition::synthetic(name.as_str());
                (&synthetic, None)
            }
        };

        let ftype_code = def
            .ftype_code
            .clone()
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| name.clone());

        ClassifiedAttribute {
            segment: segment.to_string(),
            attr_code: def.attr_code.clone(),
            attr_class: def.attr_class.clone(),
            ftype_code,
            felem_code: def.felem_code.clone(),
            usage_type,
            attr_id: def.attr_id,
            value,
        }
    }

    /// Label inference; strategies are tried strictly in order
    pub fn infer_label(&self, name: &str) -> LabelMatch<'a> {
        if let Some(def) = self.catalog.get(name) {
            return LabelMatch::Exact(def);
        }

        if let Some((label, code)) = name.split_once('_') {
            if let Some(def) = self.catalog.get(code) {
                return LabelMatch::Prefixed(def, label.to_string());
            }
        }

        if let Some((code, label)) = name.rsplit_once('_') {
            if let Some(def) = self.catalog.get(code) {
                return LabelMatch::Suffixed(def, label.to_string());
            }
        }

        LabelMatch::Unknown
    }
}

/// Classified attributes bucketed by (segment, feature type, usage type),
/// buckets kept in first-seen order
#[derive(Default)]
struct AttributeGroups {
    index: AHashMap<(String, String, String), usize>,
    groups: Vec<((String, String, Option<String>), Vec<ClassifiedAttribute>)>,
}

impl AttributeGroups {
    fn push(&mut self, attr: ClassifiedAttribute) {
        let key = (
            attr.segment.clone(),
            attr.ftype_code.clone(),
            attr.usage_type.clone().unwrap_or_default(),
        );
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                self.groups.push((
                    (attr.segment.clone(), attr.ftype_code.clone(), attr.usage_type.clone()),
                    Vec::new(),
                ));
                self.index.insert(key, slot);
                slot
            }
        };
        self.groups[slot].1.push(attr);
    }

    fn merge(self) -> Vec<GroupedAttribute> {
        self.groups
            .into_iter()
            .map(|((segment, attribute, usage_type), members)| {
                merge_group(segment, attribute, usage_type, members)
            })
            .collect()
    }
}

fn merge_group(
    segment: String,
    attribute: String,
    mut usage_type: Option<String>,
    mut members: Vec<ClassifiedAttribute>,
) -> GroupedAttribute {
    members.sort_by_key(|m| m.attr_id);

    let mut min_attr_id = SYNTHETIC_ATTR_ID;
    let mut values = Vec::with_capacity(members.len());
    let mut used_from_dt = None;
    let mut used_thru_dt = None;

    for member in members {
        min_attr_id = min_attr_id.min(member.attr_id);
        match member.felem_code.as_deref() {
            Some(felem::USAGE_TYPE) => usage_type = Some(member.value),
            Some(felem::USED_FROM_DT) => used_from_dt = Some(member.value),
            Some(felem::USED_THRU_DT) => used_thru_dt = Some(member.value),
            // the optional key type of a pointer is not part of its value
            Some(felem::KEY_TYPE) if attribute == ftype::REL_POINTER => {}
            _ => values.push(member.value),
        }
    }

    GroupedAttribute {
        segment,
        attr_id: min_attr_id,
        attribute,
        value: values.join(" "),
        usage_type,
        used_from_dt,
        used_thru_dt,
    }
}

/// Empty values (null, "", [], {}, false, 0) are skipped
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
