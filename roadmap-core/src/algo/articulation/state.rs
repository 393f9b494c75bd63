use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use petgraph::graph::NodeIndex;

/// Depth of a node no traversal has reached yet
pub(super) const UNVISITED: u32 = u32::MAX;

/// Stage of a node on the explicit DFS stack
#[derive(Debug)]
pub(super) enum Phase {
    /// Pushed, neighbours not staged yet
    Discovered,
    /// Staged neighbours are taken one at a time
    Expanding(VecDeque<NodeIndex>),
    /// Every neighbour handled, ready to report to the parent
    Finished,
}

#[derive(Debug)]
pub(super) struct Frame {
    pub(super) node: NodeIndex,
    pub(super) phase: Phase,
}

impl Frame {
    pub(super) fn new(node: NodeIndex) -> Self {
        Self {
            node,
            phase: Phase::Discovered,
        }
    }
}

/// Workspace of one analysis run, one slot per node index
#[derive(Debug)]
pub(super) struct ArticulationState {
    depth: Vec<u32>,
    low_link: Vec<u32>,
    parent: Vec<Option<NodeIndex>>,
    visited: FixedBitSet,
}

impl ArticulationState {
    pub(super) fn new(node_count: usize) -> Self {
        Self {
            depth: vec![UNVISITED; node_count],
            low_link: vec![0; node_count],
            parent: vec![None; node_count],
            visited: FixedBitSet::with_capacity(node_count),
        }
    }

    pub(super) fn discover(&mut self, node: NodeIndex, depth: u32, parent: Option<NodeIndex>) {
        let slot = node.index();
        self.depth[slot] = depth;
        self.parent[slot] = parent;
        self.visited.insert(slot);
    }

    pub(super) fn is_visited(&self, node: NodeIndex) -> bool {
        self.visited.contains(node.index())
    }

    pub(super) fn depth(&self, node: NodeIndex) -> u32 {
        self.depth[node.index()]
    }

    pub(super) fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.parent[node.index()]
    }

    pub(super) fn low_link(&self, node: NodeIndex) -> u32 {
        self.low_link[node.index()]
    }

    pub(super) fn set_low_link(&mut self, node: NodeIndex, low_link: u32) {
        self.low_link[node.index()] = low_link;
    }

    /// Lowers the low-link of `node` to `candidate` if smaller
    pub(super) fn tighten_low_link(&mut self, node: NodeIndex, candidate: u32) {
        let slot = &mut self.low_link[node.index()];
        *slot = (*slot).min(candidate);
    }
}
