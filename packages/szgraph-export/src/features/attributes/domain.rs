// Attribute Domain Models
//
// Catalog definitions, per-field classifications and the grouped attributes
// handed to the graph builders.

use serde::{Deserialize, Serialize};

/// Attribute id given to fields the catalog does not know
pub const SYNTHETIC_ATTR_ID: i64 = 9999;

/// Attribute class given to fields the catalog does not know
pub const PAYLOAD_CLASS: &str = "PAYLOAD";

/// Segment id of top-level scalar fields
pub const ROOT_SEGMENT: &str = "ROOT";

/// Feature element codes with special meaning while merging a group
pub mod felem {
    pub const USAGE_TYPE: &str = "USAGE_TYPE";
    pub const USED_FROM_DT: &str = "USED_FROM_DT";
    pub const USED_THRU_DT: &str = "USED_THRU_DT";
    pub const KEY_TYPE: &str = "KEY_TYPE";
}

/// Feature type codes the graph builders act on
pub mod ftype {
    pub const DATA_SOURCE: &str = "DATA_SOURCE";
    pub const RECORD_ID: &str = "RECORD_ID";
    pub const REL_ANCHOR: &str = "REL_ANCHOR";
    pub const REL_POINTER: &str = "REL_POINTER";
    pub const LOAD_ID: &str = "LOAD_ID";
    pub const RECORD_TYPE: &str = "RECORD_TYPE";
    pub const NAME: &str = "NAME";
}

/// One entry of the engine's attribute dictionary (`CFG_ATTR`)
///
/// Extra columns in the configuration document (`FELEM_REQ`, `INTERNAL`, ...)
/// are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AttributeDefinition {
    /// Ordering key
    pub attr_id: i64,
    /// Canonical attribute name (e.g. `ADDR_LINE1`)
    pub attr_code: String,
    /// Attribute class (e.g. `ADDRESS`, `NAME`)
    pub attr_class: String,
    /// Feature type the attribute contributes to
    #[serde(default)]
    pub ftype_code: Option<String>,
    /// Element of the feature the attribute fills
    #[serde(default)]
    pub felem_code: Option<String>,
}

impl AttributeDefinition {
    pub fn new(attr_id: i64, attr_code: impl Into<String>, attr_class: impl Into<String>) -> Self {
        Self {
            attr_id,
            attr_code: attr_code.into(),
            attr_class: attr_class.into(),
            ftype_code: None,
            felem_code: None,
        }
    }

    pub fn with_feature(mut self, ftype_code: impl Into<String>, felem_code: impl Into<String>) -> Self {
        self.ftype_code = Some(ftype_code.into());
        self.felem_code = Some(felem_code.into());
        self
    }

    /// Ad-hoc definition for a field the catalog does not know
    pub fn synthetic(code: impl Into<String>) -> Self {
        Self::new(SYNTHETIC_ATTR_ID, code, PAYLOAD_CLASS)
    }
}

/// A single payload field after label inference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedAttribute {
    pub segment: String,
    pub attr_code: String,
    pub attr_class: String,
    pub ftype_code: String,
    pub felem_code: Option<String>,
    pub usage_type: Option<String>,
    pub attr_id: i64,
    pub value: String,
}

/// Classified attributes of one (segment, feature type, usage type) merged
/// into a single value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedAttribute {
    pub segment: String,
    /// Smallest attr id in the group
    pub attr_id: i64,
    /// Feature type code
    pub attribute: String,
    /// Element values joined by single spaces in attr id order
    pub value: String,
    pub usage_type: Option<String>,
    pub used_from_dt: Option<String>,
    pub used_thru_dt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_from_config_json() {
        let def: AttributeDefinition = serde_json::from_value(serde_json::json!({
            "ATTR_ID": 1201,
            "ATTR_CODE": "ADDR_LINE1",
            "ATTR_CLASS": "ADDRESS",
            "FTYPE_CODE": "ADDRESS",
            "FELEM_CODE": "ADDR_LINE1",
            "FELEM_REQ": "Yes",
            "DEFAULT_VALUE": null,
            "INTERNAL": "No"
        }))
        .unwrap();

        assert_eq!(
            def,
            AttributeDefinition::new(1201, "ADDR_LINE1", "ADDRESS").with_feature("ADDRESS", "ADDR_LINE1")
        );
    }

    #[test]
    fn test_definition_null_feature() {
        let def: AttributeDefinition = serde_json::from_value(serde_json::json!({
            "ATTR_ID": 1,
            "ATTR_CODE": "DATA_SOURCE",
            "ATTR_CLASS": "OBSERVATION",
            "FTYPE_CODE": null,
            "FELEM_CODE": null
        }))
        .unwrap();
        assert!(def.ftype_code.is_none());
        assert!(def.felem_code.is_none());
    }

    #[test]
    fn test_synthetic() {
        let def = AttributeDefinition::synthetic("FAVORITE_COLOR");
        assert_eq!(def.attr_id, SYNTHETIC_ATTR_ID);
        assert_eq!(def.attr_class, PAYLOAD_CLASS);
    }
}
