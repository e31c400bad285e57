//! Tool-calling surface and the resolve → fetch → label orchestration.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, info, instrument};

use crate::{
    Config, diagnostics,
    error::WeatherError,
    model::{WeatherInput, WeatherReport, WeatherSummary},
    provider::{
        ConditionsFetcher, LocationResolver, OpenMeteoForecast, OpenMeteoGeocoder, http_client,
    },
};

pub const TOOL_NAME: &str = "get_weather";

/// A capability an agent framework can call with JSON input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the framework dispatches on.
    fn name(&self) -> &str;

    /// Helps the model decide when to call the tool.
    fn description(&self) -> &str;

    /// JSON schema of the accepted input object.
    fn input_schema(&self) -> Value;

    /// JSON schema of the returned object.
    fn output_schema(&self) -> Value;

    /// Run the tool. Errors carry a descriptive message and are not downgraded.
    async fn execute(&self, input: Value) -> Result<Value, WeatherError>;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
            output_schema: self.output_schema(),
        }
    }
}

/// Serializable descriptor handed to the framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub output_schema: Value,
}

/// Where a lookup was when it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    Fetching,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Resolving => "resolving",
            Stage::Fetching => "fetching",
        })
    }
}

/// Current-weather tool: geocode the place name, then fetch current conditions for it.
#[derive(Debug)]
pub struct WeatherTool {
    resolver: Box<dyn LocationResolver>,
    fetcher: Box<dyn ConditionsFetcher>,
    diagnostics: Option<Config>,
}

impl WeatherTool {
    pub fn new(
        resolver: impl LocationResolver + 'static,
        fetcher: impl ConditionsFetcher + 'static,
    ) -> Self {
        Self { resolver: Box::new(resolver), fetcher: Box::new(fetcher), diagnostics: None }
    }

    /// Open-Meteo geocoding and forecast sharing one HTTP client.
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let http = http_client(config)?;
        let tool = Self::new(
            OpenMeteoGeocoder::new(http.clone(), config),
            OpenMeteoForecast::new(http, config),
        );

        Ok(if config.diagnostics { tool.with_diagnostics(config.clone()) } else { tool })
    }

    /// Probe the hosts in `config` before every lookup.
    pub fn with_diagnostics(mut self, config: Config) -> Self {
        self.diagnostics = Some(config);
        self
    }

    pub async fn get_weather(&self, input: &WeatherInput) -> Result<WeatherSummary, WeatherError> {
        self.report(input).await.map(|report| report.summary)
    }

    /// Like [`WeatherTool::get_weather`], also returning the resolved place and raw conditions.
    #[instrument(skip(self, input), fields(location = %input.location))]
    pub async fn report(&self, input: &WeatherInput) -> Result<WeatherReport, WeatherError> {
        if let Some(config) = &self.diagnostics {
            diagnostics::probe(config).await;
        }

        debug!(stage = %Stage::Resolving, "Starting weather lookup");
        let place = self
            .resolver
            .resolve(&input.location)
            .await
            .map_err(|e| log_failure(Stage::Resolving, e))?;

        debug!(
            stage = %Stage::Fetching,
            latitude = place.latitude,
            longitude = place.longitude,
            "Location resolved"
        );
        let current = self
            .fetcher
            .current(place.latitude, place.longitude)
            .await
            .map_err(|e| log_failure(Stage::Fetching, e))?;

        let report = WeatherReport::new(place, current);
        info!(
            resolved = %report.summary.location,
            conditions = %report.summary.conditions,
            "Weather lookup done"
        );

        Ok(report)
    }
}

fn log_failure(stage: Stage, err: WeatherError) -> WeatherError {
    match std::error::Error::source(&err) {
        Some(cause) => error!(%stage, error = %err, cause = %cause, "Weather lookup failed"),
        None => error!(%stage, error = %err, "Weather lookup failed"),
    }
    err
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Get current weather for a location. Resolves the place name to coordinates and \
         returns temperature, feels-like temperature, humidity, wind speed, wind gusts and \
         a short description of the conditions."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "minLength": 1,
                    "description": "City name"
                }
            },
            "required": ["location"]
        })
    }

    fn output_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "temperature": { "type": "number" },
                "feelsLike": { "type": "number" },
                "humidity": { "type": "number" },
                "windSpeed": { "type": "number" },
                "windGust": { "type": "number" },
                "conditions": { "type": "string" },
                "location": { "type": "string" }
            },
            "required": [
                "temperature", "feelsLike", "humidity", "windSpeed",
                "windGust", "conditions", "location"
            ]
        })
    }

    async fn execute(&self, input: Value) -> Result<Value, WeatherError> {
        let input: WeatherInput =
            serde_json::from_value(input).map_err(|e| WeatherError::InvalidInput(e.to_string()))?;

        if input.location.trim().is_empty() {
            return Err(WeatherError::InvalidInput("location must not be empty".to_string()));
        }

        let summary = self.get_weather(&input).await?;
        serde_json::to_value(summary).map_err(WeatherError::Output)
    }
}
