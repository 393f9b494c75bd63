//! Data model of the road network
//!
//! Contains the node, road and segment types and the graph that owns them.

pub mod road_network;

pub use road_network::{
    IndexedPoint, Projection, Road, RoadGraph, RoadGraphMeta, RoadNode, Segment,
};
