use geo::{Distance, Euclidean};

use crate::define_index_newtype;

define_index_newtype!(LocationIdx, Location);

/// A place a vehicle can start from, end at or serve a job at.
///
/// Coordinates are optional: travel data always comes from the
/// [`TravelMatrices`](super::travel_cost_matrix::TravelMatrices), the point is
/// only used for spatial heuristics such as radial ruin.
#[derive(Debug, Clone)]
pub struct Location {
    external_id: String,
    point: Option<geo::Point>,
}

impl Location {
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            point: None,
        }
    }

    pub fn from_cartesian(external_id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            external_id: external_id.into(),
            point: Some(geo::Point::new(x, y)),
        }
    }

    pub fn from_lat_lon(external_id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            external_id: external_id.into(),
            point: Some(geo::Point::new(lon, lat)),
        }
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn point(&self) -> Option<geo::Point> {
        self.point
    }

    pub fn has_coordinates(&self) -> bool {
        self.point.is_some()
    }

    /// Straight-line distance between the raw coordinates, `None` when either
    /// side has no coordinates.
    pub fn euclidean_distance(&self, to: &Location) -> Option<f64> {
        match (self.point, to.point) {
            (Some(from), Some(to)) => Some(Euclidean.distance(&from, &to)),
            _ => None,
        }
    }
}
