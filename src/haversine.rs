//! Straight-line directions provider (fallback when no routing engine is available).
//!
//! Produces a single candidate from origin to destination through evenly
//! interpolated waypoints, with travel time estimated from great-circle
//! distance at an assumed speed. Less accurate than OSRM but always available.

use crate::error::ProviderError;
use crate::polyline::Polyline;
use crate::traits::{DirectionsProvider, DirectionsRequest, DirectionsRoute, Location, RouteLeg};

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Intermediate points inserted between origin and destination.
const DEFAULT_WAYPOINTS: usize = 2;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(from: Location, to: Location) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Straight-line directions provider.
#[derive(Debug, Clone)]
pub struct HaversineDirections {
    /// Assumed average speed in km/h.
    pub speed_kmh: f64,
    /// Number of interpolated waypoints between the endpoints.
    pub waypoints: usize,
}

impl Default for HaversineDirections {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            waypoints: DEFAULT_WAYPOINTS,
        }
    }
}

impl HaversineDirections {
    pub fn new(speed_kmh: f64, waypoints: usize) -> Self {
        Self {
            speed_kmh,
            waypoints,
        }
    }

    fn interpolate(&self, origin: Location, destination: Location) -> Vec<Location> {
        let segments = (self.waypoints + 1) as f64;
        let mut points = Vec::with_capacity(self.waypoints + 2);
        points.push(origin);
        for i in 1..=self.waypoints {
            let factor = i as f64 / segments;
            points.push(Location::new(
                origin.lat + (destination.lat - origin.lat) * factor,
                origin.lng + (destination.lng - origin.lng) * factor,
            ));
        }
        points.push(destination);
        points
    }

    /// Convert distance in km to travel time in seconds.
    fn km_to_seconds(&self, km: f64) -> f64 {
        (km / self.speed_kmh * 3600.0).round()
    }
}

impl DirectionsProvider for HaversineDirections {
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<DirectionsRoute>, ProviderError> {
        let geometry = Polyline::new(self.interpolate(request.origin, request.destination));
        let distance_m = geometry.length_km() * 1000.0;
        let duration_secs = self.km_to_seconds(distance_m / 1000.0);

        Ok(vec![DirectionsRoute {
            geometry,
            legs: vec![RouteLeg {
                duration_secs,
                distance_m,
            }],
            duration_secs,
            distance_m,
        }])
    }
}
