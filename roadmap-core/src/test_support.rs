//! Record builders and small networks shared by unit tests

use crate::loading::{NodeRecord, RoadGraphConfig, RoadRecord, SegmentRecord, create_road_graph};
use crate::model::{Projection, RoadGraph};
use crate::{NodeId, RoadId};

/// Identity-like projection: x = lon, y = lat, one unit per degree
pub(crate) fn planar_config() -> RoadGraphConfig {
    RoadGraphConfig {
        projection: Projection {
            centre_lat: 0.0,
            centre_lon: 0.0,
            km_per_degree: 1.0,
        },
        ..RoadGraphConfig::default()
    }
}

pub(crate) fn node(node_id: NodeId, lat: f64, lon: f64) -> NodeRecord {
    NodeRecord { node_id, lat, lon }
}

pub(crate) fn road(road_id: RoadId, label: &str, oneway: bool) -> RoadRecord {
    RoadRecord {
        road_id,
        label: label.to_string(),
        city: "auckland".to_string(),
        oneway,
        ..RoadRecord::default()
    }
}

pub(crate) fn segment(road_id: RoadId, length: f64, from: NodeId, to: NodeId) -> SegmentRecord {
    SegmentRecord {
        road_id,
        length,
        node_id_1: from,
        node_id_2: to,
        coords: Vec::new(),
    }
}

pub(crate) fn graph_from(
    nodes: Vec<NodeRecord>,
    roads: Vec<RoadRecord>,
    segments: Vec<SegmentRecord>,
) -> RoadGraph {
    create_road_graph(nodes, roads, segments, &planar_config()).unwrap()
}

/// Two nodes one unit apart joined by a 1.2 long two-way segment of road 10
pub(crate) fn two_way_pair_graph() -> RoadGraph {
    graph_from(
        vec![node(1, 0.0, 0.0), node(2, 0.0, 1.0)],
        vec![road(10, "Queen Street", false)],
        vec![segment(10, 1.2, 1, 2)],
    )
}

/// Undirected network on unit-spaced points, one two-way road per edge.
/// `positions[i]` is `(lat, lon)` of node `i + 1`; edge lengths are the
/// straight-line distance times `stretch`.
pub(crate) fn undirected_graph(
    positions: &[(f64, f64)],
    edges: &[(NodeId, NodeId)],
    stretch: f64,
) -> RoadGraph {
    let nodes: Vec<_> = positions
        .iter()
        .zip(1..)
        .map(|(&(lat, lon), id)| node(id, lat, lon))
        .collect();
    let roads: Vec<_> = (0..edges.len() as RoadId)
        .map(|id| road(id, &format!("Road {id}"), false))
        .collect();
    let segments: Vec<_> = edges
        .iter()
        .zip(0..)
        .map(|(&(from, to), road_id)| {
            let (a, b) = (positions[from as usize - 1], positions[to as usize - 1]);
            let length = (a.0 - b.0).hypot(a.1 - b.1) * stretch;
            segment(road_id, length, from, to)
        })
        .collect();
    graph_from(nodes, roads, segments)
}

/// Two triangles joined by a single bridge between nodes 3 and 4
pub(crate) fn bridged_triangles() -> RoadGraph {
    undirected_graph(
        &[(0.0, 0.0), (1.0, 0.0), (0.5, 1.0), (0.5, 2.0), (0.0, 3.0), (1.0, 3.0)],
        &[(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (5, 6), (6, 4)],
        1.0,
    )
}

/// Centre node 1 with `leaves` spokes
pub(crate) fn star(leaves: u32) -> RoadGraph {
    let mut positions = vec![(0.0, 0.0)];
    positions.extend((0..leaves).map(|i| {
        let angle = f64::from(i) * std::f64::consts::TAU / f64::from(leaves);
        (angle.sin(), angle.cos())
    }));
    let edges: Vec<_> = (2..=leaves + 1).map(|leaf| (1, leaf)).collect();
    undirected_graph(&positions, &edges, 1.0)
}

/// Simple cycle 1 - 2 - ... - n - 1
pub(crate) fn cycle(n: u32) -> RoadGraph {
    let positions: Vec<_> = (0..n)
        .map(|i| {
            let angle = f64::from(i) * std::f64::consts::TAU / f64::from(n);
            (angle.sin(), angle.cos())
        })
        .collect();
    let edges: Vec<_> = (1..=n).map(|i| (i, i % n + 1)).collect();
    undirected_graph(&positions, &edges, 1.0)
}
