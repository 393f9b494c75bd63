//! Latitude/longitude to planar kilometre grid

use geo::Point;
use serde::{Deserialize, Serialize};

/// Equirectangular projection around a fixed centre.
///
/// Distances in the projected plane are in kilometres and stay close to true
/// ground distance for a city-sized extent, which keeps the straight-line
/// heuristic comparable with segment lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    pub centre_lat: f64,
    pub centre_lon: f64,
    /// Kilometres per degree of latitude
    pub km_per_degree: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            centre_lat: -36.847_622,
            centre_lon: 174.763_444,
            km_per_degree: 111.0,
        }
    }
}

impl Projection {
    fn km_per_degree_lon(&self) -> f64 {
        self.km_per_degree * self.centre_lat.to_radians().cos()
    }

    /// Projects a coordinate; x grows eastwards, y northwards
    pub fn project(&self, lat: f64, lon: f64) -> Point<f64> {
        let x = (lon - self.centre_lon) * self.km_per_degree_lon();
        let y = (lat - self.centre_lat) * self.km_per_degree;
        Point::new(x, y)
    }

    /// Inverse of [`Projection::project`], returns `(lat, lon)`
    pub fn unproject(&self, point: &Point<f64>) -> (f64, f64) {
        let lat = point.y() / self.km_per_degree + self.centre_lat;
        let lon = point.x() / self.km_per_degree_lon() + self.centre_lon;
        (lat, lon)
    }
}
