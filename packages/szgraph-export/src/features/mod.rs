// Features - Vertical Slices
//
// - attributes: payload → grouped, typed attributes
// - graph_builder: grouped attributes + relationships → graph documents

pub mod attributes;
pub mod graph_builder;
