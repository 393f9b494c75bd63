//! A* route search between two intersections

mod state;

use std::collections::BinaryHeap;

use log::debug;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use crate::model::{RoadGraph, RoadNode};
use crate::{Error, Length, NodeId, SegmentIndex};
use state::{AStarState, State};

/// Route found by [`find_path`]
#[derive(Debug, Clone, PartialEq)]
pub struct RoadPath {
    nodes: Vec<NodeIndex>,
    segments: Vec<SegmentIndex>,
    length: Length,
}

impl RoadPath {
    /// Nodes from start to goal, never empty
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// `segments()[i]` leads from `nodes()[i]` to `nodes()[i + 1]`
    pub fn segments(&self) -> &[SegmentIndex] {
        &self.segments
    }

    /// Sum of the segment lengths
    pub fn length(&self) -> Length {
        self.length
    }

    pub fn start(&self) -> NodeIndex {
        self.nodes[0]
    }

    pub fn goal(&self) -> NodeIndex {
        self.nodes[self.nodes.len() - 1]
    }

    /// Source data ids of the nodes along the path
    pub fn node_ids(&self, graph: &RoadGraph) -> Vec<NodeId> {
        self.nodes.iter().map(|&node| graph.graph[node].id).collect()
    }
}

/// Straight-line distance from `node` to `goal`.
///
/// Admissible as long as no segment is shorter than the straight line
/// between its endpoints.
pub fn heuristic(node: &RoadNode, goal: &RoadNode) -> Length {
    node.distance_to(&goal.location)
}

/// A* search for the shortest route from `start` to `goal` following
/// segments in their direction of travel.
///
/// Returns `Ok(None)` when `goal` cannot be reached. Open set entries with
/// equal `f_score` are expanded in ascending node id order, so repeated
/// searches return the same route.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] if either id is not in the graph.
pub fn find_path(
    graph: &RoadGraph,
    start: NodeId,
    goal: NodeId,
) -> Result<Option<RoadPath>, Error> {
    let start_index = graph.node_index(start)?;
    let goal_index = graph.node_index(goal)?;
    let goal_node = graph.node(goal_index)?;

    let mut state = AStarState::new(graph.node_count());
    let mut open = BinaryHeap::new();

    let start_f = heuristic(graph.node(start_index)?, goal_node);
    state.improve(start_index, 0.0, start_f, None);
    open.push(State {
        f_score: start_f,
        g_score: 0.0,
        node_id: start,
        node: start_index,
    });

    let mut expanded = 0usize;
    while let Some(State { g_score, node, .. }) = open.pop() {
        // Skip entries superseded by a cheaper path
        if g_score > state.g_score(node) || state.is_closed(node) {
            continue;
        }

        state.close(node);
        expanded += 1;

        if node == goal_index {
            debug!("Route {start} -> {goal} found after expanding {expanded} nodes");
            return state.reconstruct(graph, start_index, goal_index).map(Some);
        }

        for edge in graph.neighbours_out(node) {
            let segment = edge.weight();
            if !graph.is_traversable(segment) {
                continue;
            }

            let child = edge.target();
            let child_node = &graph.graph[child];
            let tentative_g = g_score + segment.length;
            let tentative_f = tentative_g + heuristic(child_node, goal_node);

            if state.is_closed(child) && tentative_f >= state.f_score(child) {
                continue;
            }

            if tentative_g < state.g_score(child) {
                state.improve(child, tentative_g, tentative_f, Some((node, edge.id())));
                open.push(State {
                    f_score: tentative_f,
                    g_score: tentative_g,
                    node_id: child_node.id,
                    node: child,
                });
            }
        }
    }

    debug!("No route {start} -> {goal}, {expanded} nodes expanded");
    Ok(None)
}
