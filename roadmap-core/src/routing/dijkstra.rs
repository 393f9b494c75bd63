use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::{HashMap, hash_map::Entry};
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use crate::Length;
use crate::model::RoadGraph;

/// Heap entry, the cheapest distance pops first
#[derive(Copy, Clone, Debug)]
struct Reached {
    distance: Length,
    node: NodeIndex,
}

impl Ord for Reached {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Reached {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Reached {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Reached {}

/// Shortest driving distance from `start` to every node it reaches, following
/// segments in their direction of travel.
///
/// With a `target` the search stops as soon as that node is settled; nodes
/// settled before it carry final distances, the rest are upper bounds.
/// An index that is not part of the graph reaches nothing.
pub fn dijkstra_path_weights(
    graph: &RoadGraph,
    start: NodeIndex,
    target: Option<NodeIndex>,
) -> HashMap<NodeIndex, Length> {
    let mut distances: HashMap<NodeIndex, Length> = HashMap::new();
    if graph.node(start).is_err() {
        return distances;
    }

    let mut heap = BinaryHeap::new();
    distances.insert(start, 0.0);
    heap.push(Reached {
        distance: 0.0,
        node: start,
    });

    while let Some(Reached { distance, node }) = heap.pop() {
        if target == Some(node) {
            break;
        }
        if distances.get(&node).is_some_and(|&best| distance > best) {
            continue;
        }

        for edge in graph.neighbours_out(node) {
            let segment = edge.weight();
            if !graph.is_traversable(segment) {
                continue;
            }

            let next = edge.target();
            let candidate = distance + segment.length;
            let improved = match distances.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(candidate);
                    true
                }
                Entry::Occupied(mut entry) if candidate < *entry.get() => {
                    entry.insert(candidate);
                    true
                }
                Entry::Occupied(_) => false,
            };
            if improved {
                heap.push(Reached {
                    distance: candidate,
                    node: next,
                });
            }
        }
    }

    distances
}
