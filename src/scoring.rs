//! Composite risk scoring and route selection.

use std::fmt;

use serde::Serialize;

/// Upper bound of every score component and of the composite.
pub const MAX_SCORE: f64 = 100.0;

/// Weather condition codes and their penalties.
///
/// Exactly one entry applies to a report: the first whose code matches.
pub const WEATHER_PENALTIES: &[(&str, f64)] = &[("Thunderstorm", 60.0), ("Rain", 40.0)];

/// Penalty for a weather condition code, 0 when absent or unrecognized.
pub fn weather_penalty(condition: Option<&str>) -> f64 {
    let Some(condition) = condition else {
        return 0.0;
    };
    WEATHER_PENALTIES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(condition.trim()))
        .map(|(_, penalty)| *penalty)
        .unwrap_or(0.0)
}

/// Scored risk signals for one candidate route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskBreakdown {
    pub travel_minutes: f64,
    pub weather_penalty: f64,
    pub accident_risk_score: f64,
    pub nearby_accident_count: u32,
    pub composite_score: f64,
}

impl RiskBreakdown {
    /// Blends the signals into a composite bounded to `0..=100`.
    pub fn compose(
        leg_duration_secs: f64,
        weather_penalty: f64,
        sampled_level: f64,
        nearby_accident_count: u32,
    ) -> Self {
        let travel_minutes = (leg_duration_secs / 60.0).max(0.0);
        let accident_risk_score = (sampled_level * 100.0).clamp(0.0, MAX_SCORE);
        let composite_score =
            (travel_minutes + weather_penalty + accident_risk_score).clamp(0.0, MAX_SCORE);

        Self {
            travel_minutes,
            weather_penalty,
            accident_risk_score,
            nearby_accident_count,
            composite_score,
        }
    }
}

impl fmt::Display for RiskBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accidents = match self.nearby_accident_count {
            1 => "1 reported accident".to_string(),
            n => format!("{n} reported accidents"),
        };
        write!(
            f,
            "risk {}% | time {} min | weather impact {}% | risk zones {}% | {}",
            self.composite_score.round(),
            self.travel_minutes.round(),
            self.weather_penalty.round(),
            self.accident_risk_score.round(),
            accidents
        )
    }
}

/// Index of the lowest composite score, earliest on ties. `None` when empty.
pub fn select_lowest<'a, I>(breakdowns: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a RiskBreakdown>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, breakdown) in breakdowns.into_iter().enumerate() {
        if best.is_none_or(|(_, score)| breakdown.composite_score < score) {
            best = Some((index, breakdown.composite_score));
        }
    }
    best.map(|(index, _)| index)
}
