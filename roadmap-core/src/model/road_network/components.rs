//! Road network components - nodes, roads and segments

use geo::{LineString, Point};

use crate::{Length, NodeId, RoadId, RoadIndex, SegmentIndex};

/// Road graph node (intersection)
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Source data ID of the node
    pub id: NodeId,
    /// Projected location, kilometres from the projection centre
    pub location: Point<f64>,
}

impl RoadNode {
    /// Straight-line distance to `other` in the projected plane
    pub fn distance_to(&self, other: &Point<f64>) -> Length {
        planar_distance(&self.location, other)
    }
}

/// A road: its metadata and the segments it owns
#[derive(Debug, Clone)]
pub struct Road {
    pub id: RoadId,
    pub road_type: u32,
    pub name: String,
    pub city: String,
    pub one_way: bool,
    pub speed: u8,
    pub road_class: u8,
    pub not_for_car: bool,
    pub not_for_pedestrian: bool,
    pub not_for_bicycle: bool,
    /// Segments in source data order. Mirrors of two-way segments are
    /// traversal-only and never listed here.
    pub segments: Vec<SegmentIndex>,
}

/// Directed road segment; the graph edge it is stored on gives its endpoints
#[derive(Debug, Clone)]
pub struct Segment {
    /// Owning road, an index into the graph's road store
    pub road: RoadIndex,
    /// Length in kilometres
    pub length: Length,
    /// Polyline in traversal order, for rendering only
    pub geometry: LineString<f64>,
    /// Set on the reverse copy of a two-way segment, pointing at the original
    pub mirror_of: Option<SegmentIndex>,
}

impl Segment {
    pub fn is_mirror(&self) -> bool {
        self.mirror_of.is_some()
    }

    /// Reverse copy of this segment (stored at `index`) for the opposite direction of a two-way road
    pub(crate) fn mirror(&self, index: SegmentIndex) -> Self {
        Self {
            road: self.road,
            length: self.length,
            geometry: self.geometry.0.iter().rev().copied().collect(),
            mirror_of: Some(index),
        }
    }
}

pub(crate) fn planar_distance(a: &Point<f64>, b: &Point<f64>) -> Length {
    (a.x() - b.x()).hypot(a.y() - b.y())
}
