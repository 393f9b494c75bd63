//! Road network model

pub mod components;
pub mod network;
pub mod projection;

pub use components::{Road, RoadNode, Segment};
pub use network::{IndexedPoint, RoadGraph, RoadGraphMeta};
pub use projection::Projection;
