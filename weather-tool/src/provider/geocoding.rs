use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    Config,
    error::{Endpoint, WeatherError},
    model::GeocodeResult,
};

use super::{LocationResolver, fetch_json, http_client};

/// Open-Meteo geocoding lookup (`/v1/search`).
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    endpoint: String,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client, config: &Config) -> Self {
        Self { http, endpoint: config.search_endpoint() }
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Ok(Self::new(http_client(config)?, config))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<SearchHit>>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    latitude: f64,
    longitude: f64,
    name: String,
}

#[async_trait]
impl LocationResolver for OpenMeteoGeocoder {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn resolve(&self, query: &str) -> Result<GeocodeResult, WeatherError> {
        debug!("Geocoding location");

        // `query` percent-encodes the name.
        let request = self.http.get(&self.endpoint).query(&[("name", query), ("count", "1")]);
        let parsed: SearchResponse = fetch_json(request, Endpoint::Geocoding).await?;

        // Only the first match is used; there is no ranking beyond the service's own order.
        let hit = parsed
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::NotFound { query: query.to_string() })?;

        debug!(
            name = %hit.name,
            latitude = hit.latitude,
            longitude = hit.longitude,
            "Resolved location"
        );

        Ok(GeocodeResult {
            latitude: hit.latitude,
            longitude: hit.longitude,
            display_name: hit.name,
        })
    }
}
