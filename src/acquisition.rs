//! Candidate-route acquisition.
//!
//! Directions providers often return a single route even when alternatives are
//! requested. The request is therefore retried with progressively different
//! shaping options until enough distinct candidates come back.

use std::fmt;

use tracing::{debug, warn};

use crate::error::PlanError;
use crate::traits::{
    DirectionsProvider, DirectionsRequest, DirectionsRoute, Location, RouteShaping, TravelMode,
};

/// Default number of distinct candidates that ends the search early.
pub const DEFAULT_MIN_ALTERNATIVES: usize = 2;

/// One parameterization of the directions request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteVariant {
    Plain,
    AvoidHighways,
    AvoidTolls,
    AvoidFerries,
}

/// Variants in the order they are attempted.
pub const ACQUISITION_ORDER: [RouteVariant; 4] = [
    RouteVariant::Plain,
    RouteVariant::AvoidHighways,
    RouteVariant::AvoidTolls,
    RouteVariant::AvoidFerries,
];

impl RouteVariant {
    pub fn shaping(&self) -> RouteShaping {
        let base = RouteShaping {
            alternatives: true,
            ..RouteShaping::default()
        };
        match self {
            RouteVariant::Plain => base,
            RouteVariant::AvoidHighways => RouteShaping {
                avoid_highways: true,
                ..base
            },
            RouteVariant::AvoidTolls => RouteShaping {
                avoid_tolls: true,
                ..base
            },
            RouteVariant::AvoidFerries => RouteShaping {
                avoid_ferries: true,
                ..base
            },
        }
    }

    /// Human-readable label, `None` for the plain request.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            RouteVariant::Plain => None,
            RouteVariant::AvoidHighways => Some("avoiding highways"),
            RouteVariant::AvoidTolls => Some("avoiding tolls"),
            RouteVariant::AvoidFerries => Some("avoiding ferries"),
        }
    }
}

impl fmt::Display for RouteVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("plain"))
    }
}

/// Routes obtained by the acquisition chain.
#[derive(Debug, Clone)]
pub struct Acquisition {
    pub routes: Vec<DirectionsRoute>,
    /// Shaped variant that produced enough alternatives.
    ///
    /// `None` when the plain request succeeded or when no variant reached the
    /// threshold and the best partial result was kept.
    pub variant: Option<RouteVariant>,
}

/// Tries each variant in [`ACQUISITION_ORDER`], stopping at the first one that
/// yields at least `min_alternatives` distinct routes.
///
/// Failed variants are logged and skipped. If none reaches the threshold, the
/// result with the most routes wins (earliest on ties). Fails only when every
/// variant failed outright.
pub async fn acquire_routes<D>(
    provider: &D,
    origin: Location,
    destination: Location,
    mode: TravelMode,
    min_alternatives: usize,
) -> Result<Acquisition, PlanError>
where
    D: DirectionsProvider,
{
    let mut best: Option<Vec<DirectionsRoute>> = None;

    for variant in ACQUISITION_ORDER {
        let request = DirectionsRequest {
            origin,
            destination,
            mode,
            shaping: variant.shaping(),
        };

        let routes = match provider.directions(&request).await {
            Ok(routes) => distinct(routes),
            Err(err) => {
                warn!(%variant, error = %err, "directions request failed");
                continue;
            }
        };

        debug!(%variant, candidates = routes.len(), "directions variant answered");

        if routes.len() >= min_alternatives {
            let variant = variant.label().map(|_| variant);
            return Ok(Acquisition { routes, variant });
        }

        if best.as_ref().is_none_or(|kept| routes.len() > kept.len()) {
            best = Some(routes);
        }
    }

    match best {
        Some(routes) => Ok(Acquisition {
            routes,
            variant: None,
        }),
        None => Err(PlanError::RouteAcquisition {
            attempts: ACQUISITION_ORDER.len(),
        }),
    }
}

/// Drops routes whose geometry repeats an earlier one.
fn distinct(routes: Vec<DirectionsRoute>) -> Vec<DirectionsRoute> {
    let mut kept: Vec<DirectionsRoute> = Vec::with_capacity(routes.len());
    for route in routes {
        if !kept.iter().any(|seen| seen.geometry == route.geometry) {
            kept.push(route);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyline::Polyline;

    #[test]
    fn test_variant_shaping() {
        assert_eq!(
            RouteVariant::Plain.shaping(),
            RouteShaping {
                alternatives: true,
                ..RouteShaping::default()
            }
        );
        assert!(RouteVariant::AvoidHighways.shaping().avoid_highways);
        assert!(RouteVariant::AvoidTolls.shaping().avoid_tolls);
        assert!(RouteVariant::AvoidFerries.shaping().avoid_ferries);
        assert!(!RouteVariant::AvoidFerries.shaping().avoid_tolls);
    }

    #[test]
    fn test_only_shaped_variants_have_labels() {
        assert_eq!(RouteVariant::Plain.label(), None);
        assert_eq!(RouteVariant::AvoidTolls.label(), Some("avoiding tolls"));
    }

    #[test]
    fn test_distinct_drops_repeated_geometry() {
        let route = |lat: f64| DirectionsRoute {
            geometry: Polyline::new(vec![Location::new(lat, 0.0), Location::new(lat, 1.0)]),
            legs: Vec::new(),
            duration_secs: 60.0,
            distance_m: 100.0,
        };
        let routes = distinct(vec![route(1.0), route(2.0), route(1.0)]);
        assert_eq!(routes.len(), 2);
    }
}
