//! Articulation points of the undirected road network.
//!
//! Low-link depth-first search, run iteratively with an explicit stack so
//! that long chains of roads cannot exhaust the call stack. Every connected
//! component is analysed in one call, roots taken in node insertion order.

mod state;

use hashbrown::HashSet;
use log::{debug, info};
use petgraph::graph::NodeIndex;

use crate::model::RoadGraph;
use crate::{Error, NodeId};
use state::{ArticulationState, Frame, Phase};

/// Articulation point count of one connected component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentSummary {
    /// Node the traversal of this component started from
    pub root: NodeId,
    pub node_count: usize,
    pub articulation_points: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticulationReport {
    /// Nodes whose removal disconnects their component
    pub points: HashSet<NodeIndex>,
    /// One entry per connected component, in discovery order
    pub components: Vec<ComponentSummary>,
}

impl ArticulationReport {
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.points.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Source data ids of the articulation points, ascending
    pub fn point_ids(&self, graph: &RoadGraph) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .points
            .iter()
            .map(|&node| graph.graph[node].id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// Finds every articulation point of the graph, treating segments as
/// undirected.
///
/// # Errors
///
/// Returns [`Error::EmptyGraph`] if the graph has no nodes.
pub fn find_articulation_points(graph: &RoadGraph) -> Result<ArticulationReport, Error> {
    if graph.node_count() == 0 {
        return Err(Error::EmptyGraph);
    }

    let mut state = ArticulationState::new(graph.node_count());
    let mut report = ArticulationReport::default();

    for root in graph.graph.node_indices() {
        if state.is_visited(root) {
            continue;
        }

        let points_before = report.points.len();
        let node_count = articulation_from_root(graph, root, &mut state, &mut report.points);

        let summary = ComponentSummary {
            root: graph.graph[root].id,
            node_count,
            articulation_points: report.points.len() - points_before,
        };
        debug!(
            "Component {} has {} articulation points",
            report.components.len() + 1,
            summary.articulation_points
        );
        report.components.push(summary);
    }

    info!(
        "Found {} articulation points in {} connected components",
        report.points.len(),
        report.components.len()
    );

    Ok(report)
}

/// Analyses the component containing `root` and returns its node count.
///
/// The root is an articulation point exactly when it has more than one DFS
/// subtree, every other node is judged by the low-link rule.
fn articulation_from_root(
    graph: &RoadGraph,
    root: NodeIndex,
    state: &mut ArticulationState,
    points: &mut HashSet<NodeIndex>,
) -> usize {
    state.discover(root, 0, None);

    let mut reached = 1usize;
    let mut subtrees = 0usize;
    for (edge, neighbour) in graph.neighbours_all(root) {
        if !graph.is_traversable(edge.weight()) || state.is_visited(neighbour) {
            continue;
        }
        state.discover(neighbour, 1, Some(root));
        reached += traverse_subtree(graph, neighbour, state, points);
        subtrees += 1;
    }

    if subtrees > 1 {
        points.insert(root);
    }
    reached
}

enum Step {
    Stage,
    Visit(NodeIndex),
    Exhausted,
    Report,
}

/// Iterative low-link DFS below `first`, which has been discovered already.
/// Returns the number of nodes in the subtree, `first` included.
fn traverse_subtree(
    graph: &RoadGraph,
    first: NodeIndex,
    state: &mut ArticulationState,
    points: &mut HashSet<NodeIndex>,
) -> usize {
    let mut stack = vec![Frame::new(first)];
    let mut reached = 1usize;

    while let Some(frame) = stack.last_mut() {
        let node = frame.node;
        let step = match &mut frame.phase {
            Phase::Discovered => Step::Stage,
            Phase::Expanding(pending) => pending.pop_front().map_or(Step::Exhausted, Step::Visit),
            Phase::Finished => Step::Report,
        };

        match step {
            Step::Stage => {
                state.set_low_link(node, state.depth(node));
                let parent = state.parent(node);
                let pending = graph
                    .neighbours_all(node)
                    .filter(|(edge, other)| {
                        graph.is_traversable(edge.weight()) && Some(*other) != parent
                    })
                    .map(|(_, other)| other)
                    .collect();
                frame.phase = Phase::Expanding(pending);
            }
            Step::Visit(child) if state.is_visited(child) => {
                // back edge
                state.tighten_low_link(node, state.depth(child));
            }
            Step::Visit(child) => {
                state.discover(child, state.depth(node) + 1, Some(node));
                stack.push(Frame::new(child));
                reached += 1;
            }
            Step::Exhausted => frame.phase = Phase::Finished,
            Step::Report => {
                if node != first {
                    if let Some(parent) = state.parent(node) {
                        if state.low_link(node) >= state.depth(parent) {
                            points.insert(parent);
                        }
                        state.tighten_low_link(parent, state.low_link(node));
                    }
                }
                stack.pop();
            }
        }
    }

    reached
}
