//! Property-based tests for attribute merging and match key cleanup

use proptest::prelude::*;
use serde_json::{Map, Value};
use szgraph_export::features::graph_builder::infrastructure::strip_rel_pointers;
use szgraph_export::{AttributeCatalog, AttributeClassifier, AttributeDefinition};

fn name_catalog() -> AttributeCatalog {
    AttributeCatalog::from_definitions(vec![
        AttributeDefinition::new(1, "NAME_FIRST", "NAME").with_feature("NAME", "GIVEN_NAME"),
        AttributeDefinition::new(2, "NAME_LAST", "NAME").with_feature("NAME", "SUR_NAME"),
        AttributeDefinition::new(3, "NAME_SUFFIX", "NAME").with_feature("NAME", "SUFFIX"),
    ])
}

proptest! {
    /// Merged value follows attr id order whatever the payload key order
    #[test]
    fn prop_merge_order_independent_of_input(
        first in "[A-Z]{1,8}",
        last in "[A-Z]{1,8}",
        suffix in "[A-Z]{1,3}",
        order in Just(vec![0usize, 1, 2]).prop_shuffle(),
    ) {
        let catalog = name_catalog();
        let classifier = AttributeClassifier::new(&catalog);

        let fields = [("NAME_FIRST", &first), ("NAME_LAST", &last), ("NAME_SUFFIX", &suffix)];
        let mut payload = Map::new();
        for i in order {
            let (key, value) = fields[i];
            payload.insert(key.to_string(), Value::String(value.clone()));
        }

        let grouped = classifier.parse_value(&Value::Object(payload)).unwrap();
        prop_assert_eq!(grouped.len(), 1);
        prop_assert_eq!(&grouped[0].value, &format!("{} {} {}", first, last, suffix));
        prop_assert_eq!(grouped[0].attr_id, 1);
    }

    /// Unknown keys never fail and keep their upper-cased name as feature type
    #[test]
    fn prop_unknown_keys_synthesized(key in "zz[a-z0-9]{0,8}(_[0-9]{1,4}){0,2}", value in "[A-Z0-9]{1,10}") {
        let catalog = name_catalog();
        let classifier = AttributeClassifier::new(&catalog);

        let attr = classifier.classify("ROOT", &key, value);
        prop_assert_eq!(attr.ftype_code, key.to_uppercase());
    }

    #[test]
    fn prop_strip_rel_pointers_idempotent(
        parts in prop::collection::vec(
            prop_oneof![
                "\\+[A-Z]{1,6}",
                "\\+REL_POINTER\\([A-Z_:]{0,10}\\)",
                "-[A-Z]{1,4}",
            ],
            0..8,
        )
    ) {
        let match_key = parts.concat();
        let once = strip_rel_pointers(&match_key);
        prop_assert!(!once.contains("+REL_POINTER("));
        prop_assert_eq!(strip_rel_pointers(&once), once);
    }
}
