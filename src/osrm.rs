//! OSRM HTTP adapter for route alternatives.

use serde::Deserialize;

use crate::config::{env_or, timeout_from_env};
use crate::error::ProviderError;
use crate::polyline::Polyline;
use crate::traits::{DirectionsProvider, DirectionsRequest, DirectionsRoute, Location, RouteLeg};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl OsrmConfig {
    /// Reads `SAFEROUTE_OSRM_URL` and `SAFEROUTE_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_or("SAFEROUTE_OSRM_URL", defaults.base_url),
            timeout_secs: timeout_from_env(defaults.timeout_secs),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, request: &DirectionsRequest) -> String {
        let coords = [request.origin, request.destination]
            .iter()
            .map(|at| format!("{:.6},{:.6}", at.lng, at.lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            request.mode.profile(),
            coords
        )
    }
}

/// OSRM exclude classes for the requested avoid options.
fn exclude_classes(request: &DirectionsRequest) -> Option<String> {
    let shaping = &request.shaping;
    let classes = [
        (shaping.avoid_highways, "motorway"),
        (shaping.avoid_tolls, "toll"),
        (shaping.avoid_ferries, "ferry"),
    ]
    .iter()
    .filter(|(wanted, _)| *wanted)
    .map(|(_, class)| *class)
    .collect::<Vec<_>>();

    (!classes.is_empty()).then(|| classes.join(","))
}

impl DirectionsProvider for OsrmClient {
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<DirectionsRoute>, ProviderError> {
        let mut query = vec![
            ("alternatives", request.shaping.alternatives.to_string()),
            ("overview", "full".to_string()),
            ("geometries", "geojson".to_string()),
        ];
        if let Some(exclude) = exclude_classes(request) {
            query.push(("exclude", exclude));
        }

        // OSRM reports routing failures (NoRoute, InvalidValue...) with a 400 and a
        // JSON body, so the body is read before looking at the HTTP status.
        let response = self
            .client
            .get(self.route_url(request))
            .query(&query)
            .send()
            .await?;
        let status = response.status();
        let body = match response.json::<OsrmRouteResponse>().await {
            Ok(body) => body,
            Err(err) if status.is_success() => return Err(err.into()),
            Err(_) => {
                return Err(ProviderError::Status {
                    code: status.as_u16().to_string(),
                    message: status.canonical_reason().unwrap_or_default().to_string(),
                });
            }
        };

        if body.code != "Ok" {
            return Err(ProviderError::Status {
                code: body.code,
                message: body.message.unwrap_or_default(),
            });
        }

        Ok(body
            .routes
            .unwrap_or_default()
            .into_iter()
            .map(OsrmRoute::into_route)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    duration: f64,
    distance: f64,
    geometry: OsrmGeometry,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: `[lng, lat]`.
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    duration: f64,
    distance: f64,
}

impl OsrmRoute {
    fn into_route(self) -> DirectionsRoute {
        let points = self
            .geometry
            .coordinates
            .into_iter()
            .map(|[lng, lat]| Location::new(lat, lng))
            .collect();

        DirectionsRoute {
            geometry: Polyline::new(points),
            legs: self
                .legs
                .into_iter()
                .map(|leg| RouteLeg {
                    duration_secs: leg.duration,
                    distance_m: leg.distance,
                })
                .collect(),
            duration_secs: self.duration,
            distance_m: self.distance,
        }
    }
}
