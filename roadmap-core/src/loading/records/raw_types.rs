use serde::Deserialize;

use super::de::deserialize_flag;
use crate::{Length, NodeId, RoadId};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct NodeRecord {
    pub node_id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RoadRecord {
    pub road_id: RoadId,
    #[serde(rename = "type")]
    pub road_type: u32,
    pub label: String,
    pub city: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub oneway: bool,
    pub speed: u8,
    #[serde(rename = "roadclass")]
    pub road_class: u8,
    #[serde(rename = "notforcar", deserialize_with = "deserialize_flag")]
    pub not_for_car: bool,
    #[serde(rename = "notforpede", deserialize_with = "deserialize_flag")]
    pub not_for_pedestrian: bool,
    #[serde(rename = "notforbicy", deserialize_with = "deserialize_flag")]
    pub not_for_bicycle: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SegmentRecord {
    pub road_id: RoadId,
    pub length: Length,
    pub node_id_1: NodeId,
    pub node_id_2: NodeId,
    /// Polyline as `lat, lon` pairs
    pub coords: Vec<f64>,
}
