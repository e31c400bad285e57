use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use tracing::{debug, instrument};

use crate::{
    Config,
    error::{Endpoint, WeatherError},
    model::CurrentConditions,
};

use super::{ConditionsFetcher, fetch_json, http_client};

/// Fields requested in the `current` query parameter.
pub const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,\
                                  wind_speed_10m,wind_gusts_10m,weather_code";

/// Open-Meteo forecast lookup (`/v1/forecast`), current conditions only.
#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    http: Client,
    endpoint: String,
}

impl OpenMeteoForecast {
    pub fn new(http: Client, config: &Config) -> Self {
        Self { http, endpoint: config.forecast_endpoint() }
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Ok(Self::new(http_client(config)?, config))
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    #[serde(deserialize_with = "deserialize_observation_time")]
    time: DateTime<Utc>,
    temperature_2m: f64,
    apparent_temperature: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    wind_gusts_10m: f64,
    weather_code: i64,
}

impl From<CurrentBlock> for CurrentConditions {
    fn from(block: CurrentBlock) -> Self {
        Self {
            observed_at: block.time,
            temperature_c: block.temperature_2m,
            apparent_temperature_c: block.apparent_temperature,
            relative_humidity_pct: block.relative_humidity_2m,
            wind_speed_kph: block.wind_speed_10m,
            wind_gust_kph: block.wind_gusts_10m,
            weather_code: block.weather_code,
        }
    }
}

/// Open-Meteo reports `current.time` in GMT as `2024-01-15T12:00` unless a timezone is requested.
fn parse_observation_time(raw: &str) -> Option<DateTime<Utc>> {
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc)))
}

fn deserialize_observation_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_observation_time(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid observation time '{raw}'")))
}

#[async_trait]
impl ConditionsFetcher for OpenMeteoForecast {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError> {
        debug!("Fetching current conditions");

        // Coordinates are forwarded as given; range checking is left to the caller.
        let request = self.http.get(&self.endpoint).query(&[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
        ]);
        let parsed: ForecastResponse = fetch_json(request, Endpoint::Forecast).await?;

        debug!(
            time = %parsed.current.time,
            weather_code = parsed.current.weather_code,
            "Received current conditions"
        );

        Ok(parsed.current.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_fields_are_fixed() {
        assert_eq!(
            CURRENT_FIELDS,
            "temperature_2m,apparent_temperature,relative_humidity_2m,wind_speed_10m,wind_gusts_10m,weather_code"
        );
    }

    #[test]
    fn parses_minute_precision_time() {
        let dt = parse_observation_time("2024-01-15T12:00").expect("should parse");
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 12:00");
    }

    #[test]
    fn parses_second_precision_and_rfc3339() {
        assert!(parse_observation_time("2024-01-15T12:00:30").is_some());

        let dt = parse_observation_time("2024-01-15T12:00:00+09:00").expect("should parse");
        assert_eq!(dt.format("%H:%M").to_string(), "03:00");
    }

    #[test]
    fn rejects_garbage_time() {
        assert!(parse_observation_time("yesterday").is_none());
        assert!(parse_observation_time("2024-01-15").is_none());
    }

    #[test]
    fn current_block_maps_field_for_field() {
        let parsed: ForecastResponse = serde_json::from_value(serde_json::json!({
            "latitude": 35.7,
            "longitude": 139.6875,
            "current": {
                "time": "2024-06-01T03:00",
                "interval": 900,
                "temperature_2m": 22.5,
                "apparent_temperature": 24.0,
                "relative_humidity_2m": 70,
                "wind_speed_10m": 9.4,
                "wind_gusts_10m": 20.2,
                "weather_code": 1
            }
        }))
        .unwrap();

        let current: CurrentConditions = parsed.current.into();
        assert_eq!(current.temperature_c, 22.5);
        assert_eq!(current.apparent_temperature_c, 24.0);
        assert_eq!(current.relative_humidity_pct, 70.0);
        assert_eq!(current.wind_speed_kph, 9.4);
        assert_eq!(current.wind_gust_kph, 20.2);
        assert_eq!(current.weather_code, 1);
    }

    #[test]
    fn missing_current_block_is_a_decode_error() {
        let parsed = serde_json::from_str::<ForecastResponse>(r#"{ "latitude": 1.0 }"#);
        assert!(parsed.is_err());
    }
}
