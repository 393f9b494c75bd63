//! Road graph: owning store of nodes, roads and segments

use geo::{BoundingRect, MultiPoint, Point, Rect};
use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeReference, NodeIndex},
    visit::EdgeRef,
};
use rstar::{RTree, primitives::GeomWithData};

use super::{Projection, Road, RoadNode, Segment};
use crate::{Error, Length, NodeId, RoadId, RoadIndex, SegmentIndex};

/// Node location in the spatial index
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Settings the graph was built with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadGraphMeta {
    pub projection: Projection,
    /// Ignore roads closed to cars during traversal
    pub car_roads_only: bool,
    /// Largest distance at which a picked location still selects a node
    pub max_snap_distance: Length,
}

/// Road network with frozen topology.
///
/// Nodes and segments live in a `petgraph` arena, roads in a plain vector.
/// Every cross-reference is an index into one of those stores. Each segment
/// sits in its start node's outgoing list and its end node's incoming list;
/// segments of two-way roads have a mirror edge running the other way.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    pub(crate) graph: DiGraph<RoadNode, Segment>,
    pub(crate) roads: Vec<Road>,
    pub(crate) node_lookup: HashMap<NodeId, NodeIndex>,
    pub(crate) road_lookup: HashMap<RoadId, RoadIndex>,
    pub(crate) rtree: RTree<IndexedPoint>,
    pub meta: RoadGraphMeta,
}

impl RoadGraph {
    pub fn node_index(&self, id: NodeId) -> Result<NodeIndex, Error> {
        self.node_lookup
            .get(&id)
            .copied()
            .ok_or(Error::NodeNotFound(id))
    }

    pub fn node(&self, index: NodeIndex) -> Result<&RoadNode, Error> {
        self.graph
            .node_weight(index)
            .ok_or(Error::InvalidNodeIndex)
    }

    pub fn node_by_id(&self, id: NodeId) -> Result<&RoadNode, Error> {
        self.node(self.node_index(id)?)
    }

    pub fn road_by_id(&self, id: RoadId) -> Result<&Road, Error> {
        self.road_lookup
            .get(&id)
            .map(|&index| &self.roads[index])
            .ok_or(Error::RoadNotFound(id))
    }

    pub fn road(&self, index: RoadIndex) -> Option<&Road> {
        self.roads.get(index)
    }

    /// Road owning `segment`; mirrors resolve to the road of their original
    pub fn road_of(&self, segment: &Segment) -> &Road {
        &self.roads[segment.road]
    }

    pub fn segment(&self, index: SegmentIndex) -> Option<&Segment> {
        self.graph.edge_weight(index)
    }

    /// `(start, end)` of a segment
    pub fn segment_endpoints(&self, index: SegmentIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(index)
    }

    /// Segments leaving `node`, mirrors included
    pub fn neighbours_out(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = EdgeReference<'_, Segment>> + '_ {
        self.graph.edges_directed(node, Direction::Outgoing)
    }

    /// Segments arriving at `node`, mirrors included
    pub fn neighbours_in(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = EdgeReference<'_, Segment>> + '_ {
        self.graph.edges_directed(node, Direction::Incoming)
    }

    /// Undirected view: every segment touching `node`, paired with the node
    /// at its other end
    pub fn neighbours_all(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (EdgeReference<'_, Segment>, NodeIndex)> + '_ {
        self.neighbours_out(node)
            .map(|edge| (edge, edge.target()))
            .chain(self.neighbours_in(node).map(|edge| (edge, edge.source())))
    }

    /// Whether traversal may use `segment` under the graph's settings
    pub fn is_traversable(&self, segment: &Segment) -> bool {
        !(self.meta.car_roads_only && self.road_of(segment).not_for_car)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &RoadNode)> + '_ {
        self.graph
            .node_indices()
            .map(move |index| (index, &self.graph[index]))
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// Segments as they appear in the source data (no mirrors)
    pub fn segments(&self) -> impl Iterator<Item = EdgeReference<'_, Segment>> + '_ {
        self.graph
            .edge_references()
            .filter(|edge| !edge.weight().is_mirror())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn segment_count(&self) -> usize {
        self.roads.iter().map(|road| road.segments.len()).sum()
    }

    /// Directed adjacency entries, mirrors included
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Total length of a road, each source segment counted once
    pub fn road_length(&self, road: &Road) -> Length {
        road.segments
            .iter()
            .filter_map(|&index| self.segment(index))
            .map(|segment| segment.length)
            .sum()
    }

    /// Distinct names of the roads leaving `node`
    pub fn road_names_at(&self, node: NodeIndex) -> Vec<&str> {
        self.neighbours_out(node)
            .map(|edge| self.road_of(edge.weight()).name.as_str())
            .unique()
            .collect()
    }

    /// Closest node to a projected point with its distance
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<(NodeIndex, Length)> {
        self.rtree
            .nearest_neighbor(&[point.x(), point.y()])
            .map(|nearest| {
                let node = nearest.data;
                (node, self.graph[node].distance_to(point))
            })
    }

    /// Closest node, provided it lies strictly closer than the configured snap
    /// distance
    pub fn nearest_node_within(&self, point: &Point<f64>) -> Option<NodeIndex> {
        match self.nearest_node(point) {
            Some((node, distance)) if distance < self.meta.max_snap_distance => Some(node),
            Some((_, distance)) => {
                log::trace!(
                    "Nearest node to {point:?} is {distance:.3} km away (max: {:.3} km)",
                    self.meta.max_snap_distance
                );
                None
            }
            None => None,
        }
    }

    /// Bounding rectangle of all node locations
    pub fn bounds(&self) -> Option<Rect<f64>> {
        let points: MultiPoint = self.graph.node_weights().map(|node| node.location).collect();
        points.bounding_rect()
    }
}
