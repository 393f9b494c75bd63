use serde::{Deserialize, Serialize};

use crate::model::{Projection, RoadGraphMeta};
use crate::{Error, Length};

/// Settings for building a road graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadGraphConfig {
    /// Projection of node and polyline coordinates to the planar grid
    pub projection: Projection,
    /// Route and analyse over roads open to cars only
    pub car_roads_only: bool,
    /// Largest distance, in kilometres, at which a picked location still
    /// selects a node
    pub max_snap_distance: Length,
}

impl Default for RoadGraphConfig {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            car_roads_only: false,
            max_snap_distance: 0.15,
        }
    }
}

impl RoadGraphConfig {
    /// Parses a JSON document; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub(crate) fn meta(&self) -> RoadGraphMeta {
        RoadGraphMeta {
            projection: self.projection,
            car_roads_only: self.car_roads_only,
            max_snap_distance: self.max_snap_distance,
        }
    }
}
