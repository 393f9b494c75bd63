use std::cmp::Ordering;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

use super::RoadPath;
use crate::model::RoadGraph;
use crate::{Error, Length, NodeId, SegmentIndex};

/// Open set entry
#[derive(Copy, Clone, Debug)]
pub(super) struct State {
    pub(super) f_score: Length,
    pub(super) g_score: Length,
    pub(super) node_id: NodeId,
    pub(super) node: NodeIndex,
}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by f_score, equal scores pop in ascending node id order
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.node_id.cmp(&self.node_id))
            .then_with(|| other.node.cmp(&self.node))
            .then_with(|| other.g_score.total_cmp(&self.g_score))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Best known scores of a reached node
#[derive(Copy, Clone, Debug)]
struct Visit {
    g_score: Length,
    f_score: Length,
    /// Predecessor and the segment taken from it
    parent: Option<(NodeIndex, SegmentIndex)>,
}

/// Workspace of one search, dropped when the search returns
#[derive(Debug)]
pub(super) struct AStarState {
    visits: HashMap<NodeIndex, Visit>,
    closed: FixedBitSet,
}

impl AStarState {
    pub(super) fn new(node_count: usize) -> Self {
        // Estimate capacity based on graph size
        let estimated_nodes = node_count.min(1000);
        Self {
            visits: HashMap::with_capacity(estimated_nodes),
            closed: FixedBitSet::with_capacity(node_count),
        }
    }

    /// Best cost from the start so far, infinite if unreached
    pub(super) fn g_score(&self, node: NodeIndex) -> Length {
        self.visits
            .get(&node)
            .map_or(Length::INFINITY, |visit| visit.g_score)
    }

    pub(super) fn f_score(&self, node: NodeIndex) -> Length {
        self.visits
            .get(&node)
            .map_or(Length::INFINITY, |visit| visit.f_score)
    }

    pub(super) fn is_closed(&self, node: NodeIndex) -> bool {
        self.closed.contains(node.index())
    }

    pub(super) fn close(&mut self, node: NodeIndex) {
        self.closed.insert(node.index());
    }

    /// Records a cheaper path to `node`; a closed node goes back to the open set
    pub(super) fn improve(
        &mut self,
        node: NodeIndex,
        g_score: Length,
        f_score: Length,
        parent: Option<(NodeIndex, SegmentIndex)>,
    ) {
        self.visits.insert(
            node,
            Visit {
                g_score,
                f_score,
                parent,
            },
        );
        self.closed.set(node.index(), false);
    }

    /// Follows predecessors from `goal` back to `start`
    pub(super) fn reconstruct(
        &self,
        graph: &RoadGraph,
        start: NodeIndex,
        goal: NodeIndex,
    ) -> Result<RoadPath, Error> {
        let mut nodes = vec![goal];
        let mut segments = Vec::new();

        let mut current = goal;
        while current != start {
            let (previous, via) = self
                .visits
                .get(&current)
                .and_then(|visit| visit.parent)
                .ok_or_else(|| Error::BrokenPath(graph.graph[current].id))?;
            segments.push(via);
            nodes.push(previous);
            current = previous;
        }

        // Now path is from start to goal
        nodes.reverse();
        segments.reverse();

        Ok(RoadPath {
            nodes,
            segments,
            length: self.g_score(goal),
        })
    }
}
