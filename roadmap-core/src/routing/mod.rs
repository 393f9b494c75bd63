//! Route finding over the road graph

pub mod astar;
pub mod dijkstra;
mod route_summary;

pub use astar::{RoadPath, find_path, heuristic};
pub use dijkstra::dijkstra_path_weights;
pub use route_summary::{RoadLength, RouteSummary};
