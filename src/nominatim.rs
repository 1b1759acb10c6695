//! Nominatim HTTP adapter for address resolution.

use serde::Deserialize;

use crate::config::{env_or, timeout_from_env};
use crate::error::ProviderError;
use crate::traits::{AddressResolver, Location, ResolvedAddress};

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Nominatim's usage policy requires an identifying user agent.
    pub user_agent: String,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            timeout_secs: 10,
            user_agent: concat!("saferoute-planner/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl NominatimConfig {
    /// Reads `SAFEROUTE_NOMINATIM_URL` and `SAFEROUTE_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_or("SAFEROUTE_NOMINATIM_URL", defaults.base_url),
            timeout_secs: timeout_from_env(defaults.timeout_secs),
            user_agent: defaults.user_agent,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }
}

impl AddressResolver for NominatimClient {
    async fn resolve(&self, address: &str) -> Result<ResolvedAddress, ProviderError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let places = self
            .client
            .get(url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<NominatimPlace>>()
            .await?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NotFound(address.to_string()))?;

        // Nominatim encodes coordinates as strings.
        let (Ok(lat), Ok(lng)) = (place.lat.parse::<f64>(), place.lon.parse::<f64>()) else {
            return Err(ProviderError::IncompleteResponse);
        };

        Ok(ResolvedAddress {
            location: Location::new(lat, lng),
            label: place.display_name,
        })
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}
