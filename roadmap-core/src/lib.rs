//! Graph engine of the road map viewer.
//!
//! Holds the road network (nodes, roads and directed segments) built once
//! from parsed entity records, and the two queries the viewer runs over it:
//! A* route finding between two intersections and articulation point
//! detection across every connected component.
//!
//! The topology is read-only once built. Every query keeps its scratch state
//! in a workspace owned by the call, so a shared `&RoadGraph` can serve any
//! number of queries, sequentially or from several threads.

pub mod algo;
mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, ReferenceError};
pub use petgraph::graph::NodeIndex;

/// Node identifier as it appears in the source data
pub type NodeId = u32;
/// Road identifier as it appears in the source data
pub type RoadId = u32;
/// Position of a road in the graph's road store
pub type RoadIndex = usize;
/// Handle of a directed segment (original or mirror) in the adjacency store
pub type SegmentIndex = petgraph::graph::EdgeIndex;
/// Distance in kilometres of the projected plane
pub type Length = f64;
