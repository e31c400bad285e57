use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::{
    Config,
    error::{Endpoint, TransportFailure, WeatherError},
    model::{CurrentConditions, GeocodeResult},
};

pub mod forecast;
pub mod geocoding;

pub use forecast::OpenMeteoForecast;
pub use geocoding::OpenMeteoGeocoder;

/// Turns a place name into a single best-match location.
#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    async fn resolve(&self, query: &str) -> Result<GeocodeResult, WeatherError>;
}

/// Turns coordinates into the current observed conditions.
#[async_trait]
pub trait ConditionsFetcher: Send + Sync + Debug {
    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError>;
}

/// Build the shared HTTP client; the configured timeout bounds every request made with it.
pub fn http_client(config: &Config) -> Result<Client, WeatherError> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(WeatherError::Client)
}

/// Send `request` and decode a JSON body.
///
/// Send failures, non-success statuses and undecodable bodies all map to
/// [`WeatherError::Transport`] for `endpoint`.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    endpoint: Endpoint,
) -> Result<T, WeatherError> {
    let res = request.send().await.map_err(|e| WeatherError::transport(endpoint, e))?;

    let status = res.status();
    let body = res.text().await.map_err(|e| WeatherError::transport(endpoint, e))?;

    if !status.is_success() {
        return Err(WeatherError::transport(
            endpoint,
            TransportFailure::Status { status, body: truncate_body(&body) },
        ));
    }

    serde_json::from_str(&body).map_err(|e| WeatherError::transport(endpoint, e))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
