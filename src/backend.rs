//! HTTP adapter for the accident-reporting backend.
//!
//! The backend serves two endpoints used by the planner: `/clima` relays current
//! weather (OpenWeather-shaped) and `/api/riesgo/calcular` reports accident risk
//! around a single coordinate.

use serde::{Deserialize, Serialize};

use crate::config::{env_or, timeout_from_env};
use crate::error::ProviderError;
use crate::traits::{AccidentRiskProvider, Location, RiskSample, WeatherProvider};

const WEATHER_PATH: &str = "/clima";
const RISK_PATH: &str = "/api/riesgo/calcular";

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl BackendConfig {
    /// Reads `SAFEROUTE_BACKEND_URL` and `SAFEROUTE_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_or("SAFEROUTE_BACKEND_URL", defaults.base_url),
            timeout_secs: timeout_from_env(defaults.timeout_secs),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    config: BackendConfig,
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

impl WeatherProvider for BackendClient {
    async fn current_condition(&self, at: Location) -> Result<Option<String>, ProviderError> {
        let body = self
            .client
            .get(self.url(WEATHER_PATH))
            .query(&[("lat", at.lat), ("lon", at.lng)])
            .send()
            .await?
            .error_for_status()?
            .json::<WeatherResponse>()
            .await?;

        Ok(body
            .weather
            .and_then(|conditions| conditions.into_iter().next())
            .and_then(|condition| condition.main))
    }
}

impl AccidentRiskProvider for BackendClient {
    async fn risk_at(&self, at: Location) -> Result<RiskSample, ProviderError> {
        let body = self
            .client
            .post(self.url(RISK_PATH))
            .json(&RiskRequest {
                lat: at.lat,
                lng: at.lng,
            })
            .send()
            .await?
            .error_for_status()?
            .json::<RiskResponse>()
            .await?;

        let default = RiskSample::default();
        Ok(RiskSample {
            level: body.nivel_riesgo.unwrap_or(default.level),
            accidents: body.accidentes_cercanos.unwrap_or(default.accidents),
        })
    }
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    weather: Option<Vec<WeatherCondition>>,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    main: Option<String>,
}

#[derive(Debug, Serialize)]
struct RiskRequest {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct RiskResponse {
    #[serde(alias = "riesgo")]
    nivel_riesgo: Option<f64>,
    #[serde(alias = "accidentes")]
    accidentes_cercanos: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_response_aliases() {
        let body: RiskResponse =
            serde_json::from_str(r#"{"riesgo": 0.4, "accidentes": 3}"#).expect("parse");
        assert_eq!(body.nivel_riesgo, Some(0.4));
        assert_eq!(body.accidentes_cercanos, Some(3.0));
    }

    #[test]
    fn test_weather_without_conditions() {
        let body: WeatherResponse = serde_json::from_str(r#"{"cod": 200}"#).expect("parse");
        assert!(body.weather.is_none());
    }
}
