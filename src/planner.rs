//! Safest-route planner.
//!
//! Resolves both endpoints, acquires candidate routes, scores each one against
//! weather and sampled accident risk, and recommends the lowest-risk candidate.

use futures::future::join_all;
use tracing::{info, warn};

use crate::acquisition::{DEFAULT_MIN_ALTERNATIVES, RouteVariant, acquire_routes};
use crate::aggregation::{RouteRisk, aggregate_risk};
use crate::error::PlanError;
use crate::polyline::{DEFAULT_SAMPLE_COUNT, Polyline};
use crate::scoring::{RiskBreakdown, select_lowest, weather_penalty};
use crate::traits::{
    AccidentRiskProvider, AddressResolver, DirectionsProvider, DirectionsRoute, Location,
    ResolvedAddress, RiskSample, TravelMode, WeatherProvider,
};

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub travel_mode: TravelMode,
    /// Points sampled per route for risk queries.
    pub sample_count: usize,
    /// Distinct candidates that stop the acquisition chain early.
    pub min_alternatives: usize,
    /// Substituted for failed or missing risk samples.
    pub default_sample: RiskSample,
    /// Appended to both addresses before resolution, e.g. the city and country.
    pub locality: Option<String>,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            travel_mode: TravelMode::Driving,
            sample_count: DEFAULT_SAMPLE_COUNT,
            min_alternatives: DEFAULT_MIN_ALTERNATIVES,
            default_sample: RiskSample::default(),
            locality: None,
        }
    }
}

/// A candidate route together with its scored risk.
#[derive(Debug, Clone)]
pub struct RouteCandidate {
    pub geometry: Polyline,
    /// Travel duration used for scoring, in seconds.
    pub duration_secs: f64,
    pub length_km: f64,
    pub risk: RiskBreakdown,
    /// Sample points whose level marked them as high risk.
    pub high_risk_points: Vec<Location>,
}

/// Outcome of one planning run.
///
/// Always holds at least one candidate, and `selected` always indexes into them.
#[derive(Debug, Clone)]
pub struct PlanningResult {
    origin: ResolvedAddress,
    destination: ResolvedAddress,
    candidates: Vec<RouteCandidate>,
    selected: usize,
    variant: Option<RouteVariant>,
    note: String,
}

impl PlanningResult {
    pub fn origin(&self) -> &ResolvedAddress {
        &self.origin
    }

    pub fn destination(&self) -> &ResolvedAddress {
        &self.destination
    }

    /// Candidates in acquisition order.
    pub fn candidates(&self) -> &[RouteCandidate] {
        &self.candidates
    }

    /// Index of the lowest-risk candidate.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Shaped variant that produced the alternatives, if any.
    pub fn variant(&self) -> Option<RouteVariant> {
        self.variant
    }

    /// Which acquisition strategy produced the candidates.
    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn selected_route(&self) -> &RouteCandidate {
        &self.candidates[self.selected]
    }

    pub fn recommendation(&self) -> String {
        format!(
            "Recommended route: #{} (risk {}%)",
            self.selected + 1,
            self.selected_route().risk.composite_score.round()
        )
    }

    /// One explanation line per candidate, in acquisition order.
    pub fn explanations(&self) -> Vec<String> {
        self.candidates
            .iter()
            .enumerate()
            .map(|(i, candidate)| format!("Route {}: {}", i + 1, candidate.risk))
            .collect()
    }
}

fn acquisition_note(found: usize, min_alternatives: usize, variant: Option<RouteVariant>) -> String {
    if found < min_alternatives {
        return match found {
            1 => "Only one route could be obtained even after retries.".to_string(),
            n => format!("Only {n} routes could be obtained even after retries."),
        };
    }
    match variant.and_then(|v| v.label()) {
        Some(label) => format!("Alternative routes generated {label}."),
        None => format!("{found} alternative routes found."),
    }
}

/// Plans the lowest-risk route between two addresses.
///
/// Holds only its collaborators and options; every call is independent.
pub struct RouteRiskPlanner<G, D, W, R> {
    resolver: G,
    directions: D,
    weather: W,
    risk: R,
    options: PlanOptions,
}

impl<G, D, W, R> RouteRiskPlanner<G, D, W, R>
where
    G: AddressResolver,
    D: DirectionsProvider,
    W: WeatherProvider,
    R: AccidentRiskProvider,
{
    pub fn new(resolver: G, directions: D, weather: W, risk: R, options: PlanOptions) -> Self {
        Self {
            resolver,
            directions,
            weather,
            risk,
            options,
        }
    }

    pub fn options(&self) -> &PlanOptions {
        &self.options
    }

    pub async fn plan_route(&self, start: &str, end: &str) -> Result<PlanningResult, PlanError> {
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() {
            return Err(PlanError::EmptyAddress);
        }

        let origin = self.resolve(start).await?;
        let destination = self.resolve(end).await?;

        self.plan_between(origin, destination).await
    }

    /// Plans between already resolved endpoints.
    pub async fn plan_between(
        &self,
        origin: ResolvedAddress,
        destination: ResolvedAddress,
    ) -> Result<PlanningResult, PlanError> {
        let acquisition = acquire_routes(
            &self.directions,
            origin.location,
            destination.location,
            self.options.travel_mode,
            self.options.min_alternatives,
        )
        .await?;

        if acquisition.routes.is_empty() {
            return Err(PlanError::NoRoutes);
        }

        let (condition, risks) = futures::join!(
            self.condition_at(destination.location),
            join_all(acquisition.routes.iter().map(|route| self.route_risk(route)))
        );
        let penalty = weather_penalty(condition.as_deref());

        let candidates: Vec<RouteCandidate> = acquisition
            .routes
            .into_iter()
            .zip(risks)
            .map(|(route, risk)| score_candidate(route, &risk, penalty))
            .collect();

        let selected = select_lowest(candidates.iter().map(|c| &c.risk)).ok_or(PlanError::NoRoutes)?;

        info!(
            candidates = candidates.len(),
            selected,
            composite = candidates[selected].risk.composite_score,
            "route planned"
        );

        Ok(PlanningResult {
            note: acquisition_note(candidates.len(), self.options.min_alternatives, acquisition.variant),
            origin,
            destination,
            candidates,
            selected,
            variant: acquisition.variant,
        })
    }

    async fn resolve(&self, address: &str) -> Result<ResolvedAddress, PlanError> {
        let query = match &self.options.locality {
            Some(locality) => format!("{address}, {locality}"),
            None => address.to_string(),
        };
        self.resolver
            .resolve(&query)
            .await
            .map_err(|source| PlanError::AddressNotFound {
                address: address.to_string(),
                source,
            })
    }

    async fn condition_at(&self, at: Location) -> Option<String> {
        match self.weather.current_condition(at).await {
            Ok(condition) => condition,
            Err(err) => {
                warn!(error = %err, "weather lookup failed, scoring without weather penalty");
                None
            }
        }
    }

    async fn route_risk(&self, route: &DirectionsRoute) -> RouteRisk {
        let points = route.geometry.sample_points(self.options.sample_count);
        aggregate_risk(&self.risk, &points, self.options.default_sample).await
    }
}

fn score_candidate(route: DirectionsRoute, risk: &RouteRisk, weather_penalty: f64) -> RouteCandidate {
    let duration_secs = route.primary_leg_secs();
    RouteCandidate {
        length_km: route.geometry.length_km(),
        risk: RiskBreakdown::compose(duration_secs, weather_penalty, risk.level, risk.accidents),
        high_risk_points: risk.high_risk_points(),
        geometry: route.geometry,
        duration_secs,
    }
}
