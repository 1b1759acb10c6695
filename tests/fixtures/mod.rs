//! Test fixtures for saferoute-planner.
//!
//! Provides:
//! - Real Tuluá (Valle del Cauca) locations
//! - Stub collaborators with scripted answers that record what they were asked
//! - Suspending collaborators that track how many queries are in flight at once

#![allow(dead_code)]

pub mod tulua_locations;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use saferoute_planner::error::ProviderError;
use saferoute_planner::polyline::Polyline;
use saferoute_planner::traits::{
    AccidentRiskProvider, AddressResolver, DirectionsProvider, DirectionsRequest, DirectionsRoute,
    Location, ResolvedAddress, RiskSample, RouteLeg, RouteShaping, WeatherProvider,
};

pub use tulua_locations::*;

pub fn provider_failure() -> ProviderError {
    ProviderError::Status {
        code: "500".to_string(),
        message: "stub failure".to_string(),
    }
}

/// A route along a constant latitude, `vertices` points long.
pub fn route_at(lat: f64, vertices: usize, leg_secs: f64) -> DirectionsRoute {
    let points = (0..vertices)
        .map(|i| Location::new(lat, -76.20 + i as f64 * 0.001))
        .collect();
    DirectionsRoute {
        geometry: Polyline::new(points),
        legs: vec![RouteLeg {
            duration_secs: leg_secs,
            distance_m: vertices as f64 * 110.0,
        }],
        duration_secs: leg_secs,
        distance_m: vertices as f64 * 110.0,
    }
}

// ============================================================================
// Address resolution
// ============================================================================

/// Resolves addresses from a fixed table and records every query.
#[derive(Default)]
pub struct TableResolver {
    pub entries: Vec<(&'static str, Location)>,
    pub queries: RefCell<Vec<String>>,
}

impl TableResolver {
    pub fn new(entries: Vec<(&'static str, Location)>) -> Self {
        Self {
            entries,
            queries: RefCell::new(Vec::new()),
        }
    }
}

impl AddressResolver for TableResolver {
    async fn resolve(&self, address: &str) -> Result<ResolvedAddress, ProviderError> {
        self.queries.borrow_mut().push(address.to_string());
        self.entries
            .iter()
            .find(|(name, _)| address.starts_with(name))
            .map(|(name, location)| ResolvedAddress {
                location: *location,
                label: name.to_string(),
            })
            .ok_or_else(|| ProviderError::NotFound(address.to_string()))
    }
}

// ============================================================================
// Directions
// ============================================================================

/// Answers the n-th directions request with the n-th scripted reply.
///
/// Requests past the end of the script fail.
pub struct ScriptedDirections {
    pub script: Vec<Result<Vec<DirectionsRoute>, ()>>,
    pub calls: RefCell<Vec<RouteShaping>>,
}

impl ScriptedDirections {
    pub fn new(script: Vec<Result<Vec<DirectionsRoute>, ()>>) -> Self {
        Self {
            script,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Replies to every request with the same routes.
    pub fn always(routes: Vec<DirectionsRoute>) -> Self {
        Self::new(vec![Ok(routes); 4])
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl DirectionsProvider for ScriptedDirections {
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<DirectionsRoute>, ProviderError> {
        let index = self.call_count();
        self.calls.borrow_mut().push(request.shaping);
        match self.script.get(index) {
            Some(Ok(routes)) => Ok(routes.clone()),
            _ => Err(provider_failure()),
        }
    }
}

// ============================================================================
// Weather
// ============================================================================

pub enum StubWeather {
    Condition(&'static str),
    Absent,
    Failing,
}

impl WeatherProvider for StubWeather {
    async fn current_condition(&self, _at: Location) -> Result<Option<String>, ProviderError> {
        match self {
            StubWeather::Condition(code) => Ok(Some(code.to_string())),
            StubWeather::Absent => Ok(None),
            StubWeather::Failing => Err(provider_failure()),
        }
    }
}

// ============================================================================
// Accident risk
// ============================================================================

/// Risk provider backed by a closure over the queried location.
pub struct FnRisk<F> {
    pub answer: F,
    pub queries: RefCell<Vec<Location>>,
}

impl<F> FnRisk<F>
where
    F: Fn(Location) -> Result<RiskSample, ProviderError>,
{
    pub fn new(answer: F) -> Self {
        Self {
            answer,
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.borrow().len()
    }
}

impl<F> AccidentRiskProvider for FnRisk<F>
where
    F: Fn(Location) -> Result<RiskSample, ProviderError>,
{
    async fn risk_at(&self, at: Location) -> Result<RiskSample, ProviderError> {
        self.queries.borrow_mut().push(at);
        (self.answer)(at)
    }
}

pub fn level(level: f64, accidents: f64) -> Result<RiskSample, ProviderError> {
    Ok(RiskSample { level, accidents })
}

// ============================================================================
// In-flight tracking
// ============================================================================

/// Counts overlapping queries across every collaborator sharing it.
#[derive(Default)]
pub struct InFlight {
    current: Cell<usize>,
    peak: Cell<usize>,
    total: Cell<usize>,
}

impl InFlight {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Marks a query as started, yields to the executor `yields` times, then
    /// marks it finished.
    pub async fn suspend(&self, yields: usize) {
        let current = self.current.get() + 1;
        self.current.set(current);
        self.peak.set(self.peak.get().max(current));
        self.total.set(self.total.get() + 1);
        for _ in 0..yields {
            tokio::task::yield_now().await;
        }
        self.current.set(self.current.get() - 1);
    }

    pub fn peak(&self) -> usize {
        self.peak.get()
    }

    pub fn total(&self) -> usize {
        self.total.get()
    }

    pub fn current(&self) -> usize {
        self.current.get()
    }
}

/// Risk provider that suspends before answering every query with `sample`.
pub struct SuspendingRisk {
    pub tracker: Rc<InFlight>,
    pub sample: RiskSample,
    pub yields: usize,
}

impl SuspendingRisk {
    pub fn new(tracker: &Rc<InFlight>, sample: RiskSample, yields: usize) -> Self {
        Self {
            tracker: Rc::clone(tracker),
            sample,
            yields,
        }
    }
}

impl AccidentRiskProvider for SuspendingRisk {
    async fn risk_at(&self, _at: Location) -> Result<RiskSample, ProviderError> {
        self.tracker.suspend(self.yields).await;
        Ok(self.sample)
    }
}

/// Weather provider that suspends once before reporting `condition`.
pub struct SuspendingWeather {
    pub tracker: Rc<InFlight>,
    pub condition: Option<&'static str>,
}

impl SuspendingWeather {
    pub fn new(tracker: &Rc<InFlight>, condition: Option<&'static str>) -> Self {
        Self {
            tracker: Rc::clone(tracker),
            condition,
        }
    }
}

impl WeatherProvider for SuspendingWeather {
    async fn current_condition(&self, _at: Location) -> Result<Option<String>, ProviderError> {
        self.tracker.suspend(1).await;
        Ok(self.condition.map(str::to_string))
    }
}
