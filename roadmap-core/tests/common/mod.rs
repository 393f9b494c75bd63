#![allow(dead_code)]

use roadmap_core::prelude::*;

/// x = lon, y = lat, one unit per degree
pub fn planar_config() -> RoadGraphConfig {
    RoadGraphConfig {
        projection: Projection {
            centre_lat: 0.0,
            centre_lon: 0.0,
            km_per_degree: 1.0,
        },
        ..RoadGraphConfig::default()
    }
}

fn road(road_id: RoadId, oneway: bool) -> RoadRecord {
    RoadRecord {
        road_id,
        label: format!("Road {road_id}"),
        city: "auckland".to_string(),
        oneway,
        ..RoadRecord::default()
    }
}

/// `width` x `height` grid with node ids `y * width + x + 1`, plus a two-node
/// island that no grid node can reach.
///
/// Every edge is its own road. Each third vertical road is one-way northbound
/// and lengths are stretched by 0-40% so routes are not all equal.
pub fn grid_network(width: u32, height: u32) -> RoadGraph {
    let id = |x: u32, y: u32| y * width + x + 1;

    let mut nodes = Vec::new();
    for y in 0..height {
        for x in 0..width {
            nodes.push(NodeRecord {
                node_id: id(x, y),
                lat: f64::from(y),
                lon: f64::from(x),
            });
        }
    }
    let island = width * height + 1;
    nodes.push(NodeRecord {
        node_id: island,
        lat: -10.0,
        lon: -10.0,
    });
    nodes.push(NodeRecord {
        node_id: island + 1,
        lat: -10.0,
        lon: -11.0,
    });

    let mut roads = Vec::new();
    let mut segments = Vec::new();
    let mut link = |from: NodeId, to: NodeId, oneway: bool| {
        let road_id = roads.len() as RoadId;
        let stretch = 1.0 + f64::from((from * 7 + to * 13) % 5) * 0.1;
        roads.push(road(road_id, oneway));
        segments.push(SegmentRecord {
            road_id,
            length: stretch,
            node_id_1: from,
            node_id_2: to,
            coords: Vec::new(),
        });
    };

    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                link(id(x, y), id(x + 1, y), false);
            }
            if y + 1 < height {
                link(id(x, y), id(x, y + 1), x % 3 == 0);
            }
        }
    }
    link(island, island + 1, false);

    create_road_graph(nodes, roads, segments, &planar_config()).unwrap()
}
