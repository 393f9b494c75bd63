use geo::{Coord, LineString};
use hashbrown::HashMap;
use log::{debug, info};
use petgraph::graph::{DiGraph, NodeIndex};
use rstar::RTree;

use super::config::RoadGraphConfig;
use super::records::{NodeRecord, RoadRecord, SegmentRecord};
use crate::model::{IndexedPoint, Projection, Road, RoadGraph, RoadNode, Segment};
use crate::{Error, NodeId, ReferenceError, RoadId, RoadIndex};

/// Creates a road graph from the parser's entity records
///
/// Every segment is linked into its start node's outgoing and its end node's
/// incoming list. Segments of two-way roads also get a mirror edge running
/// from end to start, which is not listed among the road's segments.
///
/// # Errors
///
/// Returns [`Error::Reference`] if a segment names an unknown node or road,
/// and [`Error::InvalidData`] for duplicate ids, non-finite coordinates or
/// malformed segments. No
/// graph is produced in either case.
pub fn create_road_graph(
    nodes: Vec<NodeRecord>,
    roads: Vec<RoadRecord>,
    segments: Vec<SegmentRecord>,
    config: &RoadGraphConfig,
) -> Result<RoadGraph, Error> {
    validate_config(config)?;

    info!(
        "Building road graph from {} nodes, {} roads and {} segments",
        nodes.len(),
        roads.len(),
        segments.len()
    );

    let projection = config.projection;
    let mut graph: DiGraph<RoadNode, Segment> =
        DiGraph::with_capacity(nodes.len(), segments.len() * 2);

    let mut node_lookup: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(nodes.len());
    for record in nodes {
        if !record.lat.is_finite() || !record.lon.is_finite() {
            return Err(Error::InvalidData(format!(
                "Node {} has invalid location ({}, {})",
                record.node_id, record.lat, record.lon
            )));
        }
        let location = projection.project(record.lat, record.lon);
        let index = graph.add_node(RoadNode {
            id: record.node_id,
            location,
        });
        if node_lookup.insert(record.node_id, index).is_some() {
            return Err(Error::InvalidData(format!(
                "Duplicate node id {}",
                record.node_id
            )));
        }
    }

    let mut road_lookup: HashMap<RoadId, RoadIndex> = HashMap::with_capacity(roads.len());
    let mut road_store = Vec::with_capacity(roads.len());
    for record in roads {
        if road_lookup.insert(record.road_id, road_store.len()).is_some() {
            return Err(Error::InvalidData(format!(
                "Duplicate road id {}",
                record.road_id
            )));
        }
        road_store.push(road_from_record(record));
    }

    let mut shortcuts = 0usize;
    for (position, record) in segments.into_iter().enumerate() {
        let road = *road_lookup
            .get(&record.road_id)
            .ok_or(ReferenceError::UnknownRoad {
                segment: position,
                road: record.road_id,
            })?;
        let start = resolve_node(&node_lookup, position, record.node_id_1)?;
        let end = resolve_node(&node_lookup, position, record.node_id_2)?;

        validate_segment(position, &record)?;

        if start == end {
            debug!(
                "Segment #{position} is a self-loop at node {}",
                record.node_id_1
            );
        }
        if record.length < graph[start].distance_to(&graph[end].location) - 1e-9 {
            shortcuts += 1;
        }

        let segment = Segment {
            road,
            length: record.length,
            geometry: project_polyline(&projection, &record.coords),
            mirror_of: None,
        };

        let index = graph.add_edge(start, end, segment);
        road_store[road].segments.push(index);

        if !road_store[road].one_way {
            let mirror = graph[index].mirror(index);
            graph.add_edge(end, start, mirror);
        }
    }

    if shortcuts > 0 {
        log::warn!(
            "{shortcuts} segments are shorter than the straight line between their endpoints. \
            Routes through them may not be optimal."
        );
    }

    let rtree = RTree::bulk_load(
        graph
            .node_indices()
            .map(|index| {
                let location = graph[index].location;
                IndexedPoint::new([location.x(), location.y()], index)
            })
            .collect(),
    );

    let road_graph = RoadGraph {
        graph,
        roads: road_store,
        node_lookup,
        road_lookup,
        rtree,
        meta: config.meta(),
    };

    info!(
        "Road graph built: {} nodes, {} roads, {} segments ({} adjacency entries)",
        road_graph.node_count(),
        road_graph.road_count(),
        road_graph.segment_count(),
        road_graph.edge_count()
    );

    Ok(road_graph)
}

fn road_from_record(record: RoadRecord) -> Road {
    Road {
        id: record.road_id,
        road_type: record.road_type,
        name: record.label,
        city: record.city,
        one_way: record.oneway,
        speed: record.speed,
        road_class: record.road_class,
        not_for_car: record.not_for_car,
        not_for_pedestrian: record.not_for_pedestrian,
        not_for_bicycle: record.not_for_bicycle,
        segments: Vec::new(),
    }
}

fn resolve_node(
    lookup: &HashMap<NodeId, NodeIndex>,
    segment: usize,
    node: NodeId,
) -> Result<NodeIndex, ReferenceError> {
    lookup
        .get(&node)
        .copied()
        .ok_or(ReferenceError::UnknownNode { segment, node })
}

fn project_polyline(projection: &Projection, coords: &[f64]) -> LineString<f64> {
    coords
        .chunks_exact(2)
        .map(|pair| Coord::from(projection.project(pair[0], pair[1])))
        .collect()
}

fn validate_segment(position: usize, record: &SegmentRecord) -> Result<(), Error> {
    if !record.length.is_finite() || record.length < 0.0 {
        return Err(Error::InvalidData(format!(
            "Segment #{position} has invalid length {}",
            record.length
        )));
    }

    if record.coords.len() % 2 != 0 {
        return Err(Error::InvalidData(format!(
            "Segment #{position} has an odd number of coordinates ({})",
            record.coords.len()
        )));
    }

    if let Some(value) = record.coords.iter().find(|value| !value.is_finite()) {
        return Err(Error::InvalidData(format!(
            "Segment #{position} has an invalid coordinate {value}"
        )));
    }

    Ok(())
}

fn validate_config(config: &RoadGraphConfig) -> Result<(), Error> {
    let projection = &config.projection;
    if !projection.km_per_degree.is_finite() || projection.km_per_degree <= 0.0 {
        return Err(Error::InvalidData(format!(
            "Projection scale must be positive, got {}",
            projection.km_per_degree
        )));
    }

    if !(-90.0..=90.0).contains(&projection.centre_lat) {
        return Err(Error::InvalidData(format!(
            "Projection centre latitude out of range: {}",
            projection.centre_lat
        )));
    }

    if config.max_snap_distance.is_nan() || config.max_snap_distance < 0.0 {
        return Err(Error::InvalidData(format!(
            "Snap distance must not be negative, got {}",
            config.max_snap_distance
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use petgraph::visit::EdgeRef;

    use super::*;
    use crate::test_support::{node, planar_config, road, segment};

    fn build(
        nodes: Vec<NodeRecord>,
        roads: Vec<RoadRecord>,
        segments: Vec<SegmentRecord>,
    ) -> Result<RoadGraph, Error> {
        create_road_graph(nodes, roads, segments, &planar_config())
    }

    #[test]
    fn one_way_segment_has_no_mirror() {
        let graph = build(
            vec![node(1, 0.0, 0.0), node(2, 0.0, 1.0)],
            vec![road(10, "Victoria Street", true)],
            vec![segment(10, 1.0, 1, 2)],
        )
        .unwrap();
        let a = graph.node_index(1).unwrap();
        let b = graph.node_index(2).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbours_out(a).count(), 1);
        assert_eq!(graph.neighbours_in(a).count(), 0);
        assert_eq!(graph.neighbours_out(b).count(), 0);
        assert_eq!(graph.neighbours_in(b).count(), 1);
        assert!(graph.neighbours_out(a).all(|edge| !edge.weight().is_mirror()));
    }

    #[test]
    fn two_way_segment_has_exactly_one_mirror() {
        let graph = build(
            vec![node(1, 0.0, 0.0), node(2, 0.0, 1.0)],
            vec![road(10, "Queen Street", false)],
            vec![segment(10, 1.0, 1, 2)],
        )
        .unwrap();
        let a = graph.node_index(1).unwrap();
        let b = graph.node_index(2).unwrap();

        let mirrors: Vec<_> = graph
            .neighbours_out(b)
            .filter(|edge| edge.weight().is_mirror())
            .collect();
        assert_eq!(mirrors.len(), 1);
        assert_eq!(mirrors[0].target(), a);

        let original = graph.road_by_id(10).unwrap().segments[0];
        assert_eq!(mirrors[0].weight().mirror_of, Some(original));
        assert_eq!(graph.segment_endpoints(original), Some((a, b)));

        let road = graph.road_by_id(10).unwrap();
        assert_eq!(road.segments.len(), 1);
        assert!(!road.segments.contains(&mirrors[0].id()));
    }

    #[test]
    fn polyline_is_projected_pairwise() {
        let mut record = segment(10, 2.0, 1, 2);
        record.coords = vec![0.0, 0.0, 1.0, 0.5, 2.0, 1.0];
        let graph = build(
            vec![node(1, 0.0, 0.0), node(2, 2.0, 1.0)],
            vec![road(10, "Queen Street", true)],
            vec![record],
        )
        .unwrap();

        let index = graph.road_by_id(10).unwrap().segments[0];
        let geometry = &graph.segment(index).unwrap().geometry;
        assert_eq!(geometry.0.len(), 3);
        // planar test projection: x = lon, y = lat
        assert!((geometry.0[1].x - 0.5).abs() < 1e-12);
        assert!((geometry.0[1].y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_node_is_a_reference_error() {
        let result = build(
            vec![node(1, 0.0, 0.0)],
            vec![road(10, "Queen Street", false)],
            vec![segment(10, 1.0, 1, 2)],
        );
        assert!(matches!(
            result,
            Err(Error::Reference(ReferenceError::UnknownNode {
                segment: 0,
                node: 2
            }))
        ));
    }

    #[test]
    fn unknown_road_is_a_reference_error() {
        let result = build(
            vec![node(1, 0.0, 0.0), node(2, 0.0, 1.0)],
            vec![road(10, "Queen Street", false)],
            vec![segment(10, 1.0, 1, 2), segment(11, 1.0, 2, 1)],
        );
        assert!(matches!(
            result,
            Err(Error::Reference(ReferenceError::UnknownRoad {
                segment: 1,
                road: 11
            }))
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = build(
            vec![node(1, 0.0, 0.0), node(1, 0.0, 1.0)],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(Error::InvalidData(_))));

        let result = build(
            vec![node(1, 0.0, 0.0)],
            vec![road(10, "Queen Street", false), road(10, "Albert Street", false)],
            vec![],
        );
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn malformed_segments_are_rejected() {
        let nodes = || vec![node(1, 0.0, 0.0), node(2, 0.0, 1.0)];
        let roads = || vec![road(10, "Queen Street", false)];

        let result = build(nodes(), roads(), vec![segment(10, -1.0, 1, 2)]);
        assert!(matches!(result, Err(Error::InvalidData(_))));

        let result = build(nodes(), roads(), vec![segment(10, f64::NAN, 1, 2)]);
        assert!(matches!(result, Err(Error::InvalidData(_))));

        let mut odd = segment(10, 1.0, 1, 2);
        odd.coords = vec![0.0, 0.0, 1.0];
        let result = build(nodes(), roads(), vec![odd]);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let roads = || vec![road(10, "Queen Street", false)];

        for location in [(f64::NAN, 0.5), (0.0, f64::INFINITY)] {
            let result = build(
                vec![node(1, 0.0, 0.0), node(2, location.0, location.1), node(3, 1.0, 0.0)],
                roads(),
                vec![segment(10, 1.0, 1, 2), segment(10, 1.0, 2, 3)],
            );
            assert!(matches!(result, Err(Error::InvalidData(_))), "{location:?}");
        }

        let mut bent = segment(10, 1.0, 1, 2);
        bent.coords = vec![0.0, 0.0, f64::NAN, 0.5, 1.0, 0.0];
        let result = build(vec![node(1, 0.0, 0.0), node(2, 1.0, 0.0)], roads(), vec![bent]);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn self_loop_is_accepted() {
        let graph = build(
            vec![node(1, 0.0, 0.0)],
            vec![road(10, "Roundabout", false)],
            vec![segment(10, 0.3, 1, 1)],
        )
        .unwrap();
        let a = graph.node_index(1).unwrap();
        assert_eq!(graph.neighbours_out(a).count(), 2);
        assert!(graph.neighbours_all(a).all(|(_, other)| other == a));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = planar_config();
        config.projection.km_per_degree = 0.0;
        let result = create_road_graph(vec![], vec![], vec![], &config);
        assert!(matches!(result, Err(Error::InvalidData(_))));

        let mut config = planar_config();
        config.max_snap_distance = -1.0;
        let result = create_road_graph(vec![], vec![], vec![], &config);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn meta_follows_config() {
        let mut config = planar_config();
        config.car_roads_only = true;
        let graph = create_road_graph(vec![node(1, 0.0, 0.0)], vec![], vec![], &config).unwrap();
        assert!(graph.meta.car_roads_only);
        assert_eq!(graph.meta.projection, config.projection);
    }
}
