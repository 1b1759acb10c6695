//! Polyline representation for route geometries.
//!
//! Geometries are kept as decoded coordinate sequences. Wire formats (GeoJSON
//! from OSRM, encoded polylines elsewhere) are converted at the adapter boundary.

use serde::{Deserialize, Serialize};

use crate::haversine::haversine_km;
use crate::traits::Location;

/// Number of sample points drawn from a route when none is configured.
pub const DEFAULT_SAMPLE_COUNT: usize = 6;

/// A route geometry as an ordered sequence of coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Location>,
}

impl Polyline {
    pub fn new(points: Vec<Location>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Location] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Location> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Great-circle length of the geometry in kilometers.
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_km(pair[0], pair[1]))
            .sum()
    }

    /// Draws at most `count` representative points from the geometry.
    ///
    /// Short geometries are returned whole. Longer ones are walked with a stride
    /// of `len / count` (at least 1), stopping once `count` points are gathered.
    /// An empty geometry yields no points.
    pub fn sample_points(&self, count: usize) -> Vec<Location> {
        if self.points.is_empty() {
            return Vec::new();
        }
        if self.points.len() <= count {
            return self.points.clone();
        }

        let step = (self.points.len() / count.max(1)).max(1);
        let mut samples: Vec<Location> = self
            .points
            .iter()
            .step_by(step)
            .take(count)
            .copied()
            .collect();

        // Only reachable with count == 0.
        if samples.is_empty() {
            samples.push(self.points[self.points.len() / 2]);
        }

        samples
    }
}

impl From<Vec<Location>> for Polyline {
    fn from(points: Vec<Location>) -> Self {
        Self::new(points)
    }
}
