//! This module is responsible for turning the entity records produced by
//! the data parser into a road graph.

mod builder;
mod config;
mod records;

pub use builder::create_road_graph;
pub use config::RoadGraphConfig;
pub use records::{NodeRecord, RoadRecord, SegmentRecord};
