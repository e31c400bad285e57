use std::fmt;

use thiserror::Error;

/// Which remote lookup an outbound call was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Geocoding,
    Forecast,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Geocoding => "geocoding",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the weather tool.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Geocoding returned zero matches for the query.
    #[error("Location '{query}' not found")]
    NotFound { query: String },

    /// An outbound call failed. Timeouts, connection failures, non-success
    /// statuses and undecodable bodies all end up here.
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: TransportFailure,
    },

    /// Raw tool input did not match `{ "location": string }`.
    #[error("Invalid tool input: {0}")]
    InvalidInput(String),

    #[error("Failed to encode tool output: {0}")]
    Output(#[source] serde_json::Error),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl WeatherError {
    pub(crate) fn transport(endpoint: Endpoint, source: impl Into<TransportFailure>) -> Self {
        WeatherError::Transport { endpoint, source: source.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, WeatherError::NotFound { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, WeatherError::Transport { .. })
    }
}

/// Underlying cause of a [`WeatherError::Transport`].
#[derive(Debug, Error)]
pub enum TransportFailure {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TransportFailure {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportFailure::Request(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_query() {
        let err = WeatherError::NotFound { query: "Nonexistentplacexyz".into() };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Nonexistentplacexyz"));
    }

    #[test]
    fn transport_keeps_cause_as_source() {
        let decode = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = WeatherError::transport(Endpoint::Forecast, decode);

        assert!(err.is_transport());
        assert!(err.to_string().starts_with("forecast request failed"));

        let source = std::error::Error::source(&err).expect("transport error has a source");
        assert!(source.to_string().contains("not valid JSON"));
    }

    #[test]
    fn status_failure_display() {
        let failure = TransportFailure::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: "upstream down".into(),
        };
        let err = WeatherError::transport(Endpoint::Geocoding, failure);

        let msg = err.to_string();
        assert!(msg.contains("geocoding"));
        assert!(msg.contains("502"));
        assert!(msg.contains("upstream down"));
    }
}
