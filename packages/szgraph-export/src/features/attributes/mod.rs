// Attribute Classification
//
// Turns free-form record payloads into canonical, typed attributes driven by
// the engine's attribute dictionary.
//
// ## Architecture
// - domain: definitions, classified + grouped attributes
// - catalog: immutable code → definition lookup
// - classifier: label inference + grouping

pub mod catalog;
pub mod classifier;
pub mod domain;

pub use catalog::AttributeCatalog;
pub use classifier::{AttributeClassifier, LabelMatch};
pub use domain::{AttributeDefinition, ClassifiedAttribute, GroupedAttribute};
