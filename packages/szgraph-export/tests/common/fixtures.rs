//! Attribute dictionary and repository fixtures

use serde_json::{json, Value};
use szgraph_export::{AttributeCatalog, AttributeDefinition};

/// A trimmed engine attribute dictionary
pub fn attribute_definitions() -> Vec<AttributeDefinition> {
    vec![
        AttributeDefinition::new(1001, "DATA_SOURCE", "OBSERVATION").with_feature("DATA_SOURCE", "CODE"),
        AttributeDefinition::new(1002, "RECORD_ID", "OBSERVATION").with_feature("RECORD_ID", "VALUE"),
        AttributeDefinition::new(1003, "RECORD_TYPE", "OBSERVATION").with_feature("RECORD_TYPE", "VALUE"),
        AttributeDefinition::new(1004, "LOAD_ID", "OBSERVATION").with_feature("LOAD_ID", "VALUE"),
        AttributeDefinition::new(1101, "NAME_TYPE", "NAME").with_feature("NAME", "USAGE_TYPE"),
        AttributeDefinition::new(1102, "NAME_FULL", "NAME").with_feature("NAME", "FULL_NAME"),
        AttributeDefinition::new(1103, "NAME_FIRST", "NAME").with_feature("NAME", "GIVEN_NAME"),
        AttributeDefinition::new(1104, "NAME_LAST", "NAME").with_feature("NAME", "SUR_NAME"),
        AttributeDefinition::new(1105, "NAME_ORG", "NAME").with_feature("NAME", "ORG_NAME"),
        AttributeDefinition::new(1201, "ADDR_TYPE", "ADDRESS").with_feature("ADDRESS", "USAGE_TYPE"),
        AttributeDefinition::new(1203, "ADDR_LINE1", "ADDRESS").with_feature("ADDRESS", "ADDR1"),
        AttributeDefinition::new(1210, "ADDR_CITY", "ADDRESS").with_feature("ADDRESS", "CITY"),
        AttributeDefinition::new(1301, "PHONE_NUMBER", "PHONE").with_feature("PHONE", "PHONE_NUM"),
        AttributeDefinition::new(1401, "REL_ANCHOR_DOMAIN", "RELATIONSHIP").with_feature("REL_ANCHOR", "DOMAIN"),
        AttributeDefinition::new(1402, "REL_ANCHOR_KEY", "RELATIONSHIP").with_feature("REL_ANCHOR", "KEY"),
        AttributeDefinition::new(1501, "REL_POINTER_KEY", "RELATIONSHIP").with_feature("REL_POINTER", "KEY"),
        AttributeDefinition::new(1502, "REL_POINTER_KEY_TYPE", "RELATIONSHIP").with_feature("REL_POINTER", "KEY_TYPE"),
        AttributeDefinition::new(1503, "REL_POINTER_ROLE", "RELATIONSHIP").with_feature("REL_POINTER", "USAGE_TYPE"),
    ]
}

pub fn catalog() -> AttributeCatalog {
    AttributeCatalog::from_definitions(attribute_definitions())
}

/// Engine configuration document carrying the same dictionary
pub fn engine_config() -> Value {
    let attrs: Vec<Value> = attribute_definitions()
        .into_iter()
        .map(|def| {
            json!({
                "ATTR_ID": def.attr_id,
                "ATTR_CODE": def.attr_code,
                "ATTR_CLASS": def.attr_class,
                "FTYPE_CODE": def.ftype_code,
                "FELEM_CODE": def.felem_code,
                "FELEM_REQ": "No",
                "INTERNAL": "No"
            })
        })
        .collect();
    json!({"G2_CONFIG": {"CFG_ATTR": attrs}})
}
