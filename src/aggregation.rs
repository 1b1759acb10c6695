//! Per-sample accident risk aggregation.

use futures::future::join_all;
use tracing::warn;

use crate::traits::{AccidentRiskProvider, Location, RiskSample};

/// Sample level above which a point is reported as high risk.
pub const HIGH_RISK_LEVEL: f64 = 0.7;

/// Aggregated accident risk along one route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRisk {
    /// Mean sample level, 0..1.
    pub level: f64,
    /// Rounded sum of nearby accidents over all samples.
    pub accidents: u32,
    /// Each queried point with the sample used for it.
    pub samples: Vec<(Location, RiskSample)>,
}

impl RouteRisk {
    fn from_default(default: RiskSample) -> Self {
        Self {
            level: default.level,
            accidents: rounded_count(default.accidents),
            samples: Vec::new(),
        }
    }

    /// Sample points whose level exceeds [`HIGH_RISK_LEVEL`].
    pub fn high_risk_points(&self) -> Vec<Location> {
        self.samples
            .iter()
            .filter(|(_, sample)| sample.level > HIGH_RISK_LEVEL)
            .map(|(at, _)| *at)
            .collect()
    }
}

/// Queries every point concurrently and averages the results.
///
/// A failing query contributes `default` instead of failing the route. With no
/// points, `default` is returned without issuing any query.
pub async fn aggregate_risk<R>(provider: &R, points: &[Location], default: RiskSample) -> RouteRisk
where
    R: AccidentRiskProvider,
{
    if points.is_empty() {
        return RouteRisk::from_default(default);
    }

    let queries = points.iter().map(|&at| async move {
        let sample = match provider.risk_at(at).await {
            Ok(sample) => sanitize(sample, default),
            Err(err) => {
                warn!(lat = at.lat, lng = at.lng, error = %err, "risk sample failed, using default");
                default
            }
        };
        (at, sample)
    });
    let samples = join_all(queries).await;

    let level = samples.iter().map(|(_, s)| s.level).sum::<f64>() / samples.len() as f64;
    let accidents = rounded_count(samples.iter().map(|(_, s)| s.accidents).sum());

    RouteRisk {
        level,
        accidents,
        samples,
    }
}

fn sanitize(sample: RiskSample, default: RiskSample) -> RiskSample {
    RiskSample {
        level: if sample.level.is_finite() {
            sample.level
        } else {
            default.level
        },
        accidents: if sample.accidents.is_finite() {
            sample.accidents.max(0.0)
        } else {
            0.0
        },
    }
}

fn rounded_count(total: f64) -> u32 {
    total.round().max(0.0) as u32
}
