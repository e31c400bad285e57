//! Current-weather tool for agent/tool-calling frameworks.
//!
//! This crate defines:
//! - Configuration (service hosts, timeout, diagnostics)
//! - Geocoding and current-conditions lookups behind small traits
//! - The static weather-code label table
//! - The `get_weather` tool that chains them
//!
//! It is used by `weather-cli`, but is meant to be registered with any framework
//! that can call a [`Tool`] with JSON input.

pub mod codes;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod provider;
pub mod tool;

pub use codes::condition_label;
pub use config::Config;
pub use error::{Endpoint, TransportFailure, WeatherError};
pub use model::{CurrentConditions, GeocodeResult, WeatherInput, WeatherReport, WeatherSummary};
pub use provider::{ConditionsFetcher, LocationResolver, OpenMeteoForecast, OpenMeteoGeocoder};
pub use tool::{Tool, ToolDefinition, WeatherTool};
