//! Entity records handed over by the data parser

mod de;
mod raw_types;

pub use raw_types::{NodeRecord, RoadRecord, SegmentRecord};
