//! Per-road breakdown of a computed route

use std::fmt;

use hashbrown::{HashMap, hash_map::Entry};

use super::RoadPath;
use crate::model::RoadGraph;
use crate::{Error, Length, NodeId};

/// Distance travelled on one named road
#[derive(Debug, Clone, PartialEq)]
pub struct RoadLength {
    pub name: String,
    pub length: Length,
}

/// Roads along a route with the distance covered on each.
///
/// Segments are grouped by road name in order of first appearance. Mirror
/// segments count towards the road of their original, once per traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub from: NodeId,
    pub to: NodeId,
    pub roads: Vec<RoadLength>,
    pub total_length: Length,
}

impl RouteSummary {
    /// # Errors
    ///
    /// Returns an error if the path was not computed on `graph`.
    pub fn from_path(graph: &RoadGraph, path: &RoadPath) -> Result<Self, Error> {
        let mut roads: Vec<RoadLength> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for &index in path.segments() {
            let segment = graph.segment(index).ok_or_else(|| {
                Error::InvalidData(format!("Segment {} is not part of the graph", index.index()))
            })?;
            let name = graph.road_of(segment).name.as_str();

            match positions.entry(name) {
                Entry::Vacant(entry) => {
                    entry.insert(roads.len());
                    roads.push(RoadLength {
                        name: name.to_string(),
                        length: segment.length,
                    });
                }
                Entry::Occupied(entry) => roads[*entry.get()].length += segment.length,
            }
        }

        Ok(Self {
            from: graph.node(path.start())?.id,
            to: graph.node(path.goal())?.id,
            total_length: roads.iter().map(|road| road.length).sum(),
            roads,
        })
    }

    /// Cumulative length keyed by road name
    pub fn road_lengths(&self) -> HashMap<&str, Length> {
        self.roads
            .iter()
            .map(|road| (road.name.as_str(), road.length))
            .collect()
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "From Node {} to Node {}", self.from, self.to)?;
        for road in &self.roads {
            write!(f, "\n{} -- {:.3} km", road.name, road.length)?;
        }
        write!(f, "\nTotal length is: {:.3} km", self.total_length)
    }
}
