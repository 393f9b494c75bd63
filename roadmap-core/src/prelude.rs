// Re-export key components
pub use crate::algo::articulation::{ArticulationReport, ComponentSummary, find_articulation_points};
pub use crate::loading::{
    NodeRecord, RoadGraphConfig, RoadRecord, SegmentRecord, create_road_graph,
};
pub use crate::model::{Projection, Road, RoadGraph, RoadGraphMeta, RoadNode, Segment};
pub use crate::routing::{RoadLength, RoadPath, RouteSummary, dijkstra_path_weights, find_path};
pub use crate::{Error, ReferenceError};

// Core types for the road network
pub use crate::Length; // kilometres
pub use crate::NodeId;
pub use crate::NodeIndex;
pub use crate::RoadId;
pub use crate::RoadIndex;
pub use crate::SegmentIndex;
