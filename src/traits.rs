//! Core domain types and collaborator traits for the route planner.
//!
//! The planner only talks to the outside world through these traits. Concrete
//! adapters (OSRM, the site backend, Nominatim) live in their own modules, and
//! tests implement them with in-memory stubs.

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::polyline::Polyline;

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Travel mode requested from the directions provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Cycling,
}

impl TravelMode {
    /// OSRM profile name for this mode.
    pub fn profile(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Cycling => "cycling",
        }
    }
}

/// Route-shaping options attached to a directions request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteShaping {
    pub alternatives: bool,
    pub avoid_highways: bool,
    pub avoid_tolls: bool,
    pub avoid_ferries: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: Location,
    pub destination: Location,
    pub mode: TravelMode,
    pub shaping: RouteShaping,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLeg {
    pub duration_secs: f64,
    pub distance_m: f64,
}

/// One route returned by the directions provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRoute {
    pub geometry: Polyline,
    pub legs: Vec<RouteLeg>,
    pub duration_secs: f64,
    pub distance_m: f64,
}

impl DirectionsRoute {
    /// Duration of the primary leg, or of the whole route when it has no legs.
    pub fn primary_leg_secs(&self) -> f64 {
        self.legs
            .first()
            .map(|leg| leg.duration_secs)
            .unwrap_or(self.duration_secs)
    }
}

/// Accident risk reported for a single coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskSample {
    /// Risk level on a 0..1 scale.
    pub level: f64,
    /// Accidents recorded near the coordinate.
    pub accidents: f64,
}

impl Default for RiskSample {
    fn default() -> Self {
        Self {
            level: 0.2,
            accidents: 0.0,
        }
    }
}

/// An address resolved to a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAddress {
    pub location: Location,
    pub label: String,
}

/// Turns free-text addresses into coordinates.
#[allow(async_fn_in_trait)]
pub trait AddressResolver {
    async fn resolve(&self, address: &str) -> Result<ResolvedAddress, ProviderError>;
}

/// Produces zero or more candidate routes between two coordinates.
#[allow(async_fn_in_trait)]
pub trait DirectionsProvider {
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<DirectionsRoute>, ProviderError>;
}

/// Current weather conditions at a coordinate.
///
/// `Ok(None)` means the provider answered but carried no condition code.
#[allow(async_fn_in_trait)]
pub trait WeatherProvider {
    async fn current_condition(&self, at: Location) -> Result<Option<String>, ProviderError>;
}

/// Accident risk at a single coordinate.
#[allow(async_fn_in_trait)]
pub trait AccidentRiskProvider {
    async fn risk_at(&self, at: Location) -> Result<RiskSample, ProviderError>;
}
