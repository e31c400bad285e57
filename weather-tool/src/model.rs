use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codes::condition_label;

/// Tool input: `{ "location": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherInput {
    pub location: String,
}

impl WeatherInput {
    pub fn new(location: impl Into<String>) -> Self {
        Self { location: location.into() }
    }
}

/// Best geocoding match for a query. Values are taken verbatim from the first result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// The forecast service's `current` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub observed_at: DateTime<Utc>,
    pub temperature_c: f64,
    pub apparent_temperature_c: f64,
    pub relative_humidity_pct: f64,
    pub wind_speed_kph: f64,
    pub wind_gust_kph: f64,
    pub weather_code: i64,
}

/// Tool output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_gust: f64,
    pub conditions: String,
    pub location: String,
}

impl WeatherSummary {
    /// Numbers are copied as-is; `location` is the resolved name, not the query.
    pub fn from_parts(place: &GeocodeResult, current: &CurrentConditions) -> Self {
        Self {
            temperature: current.temperature_c,
            feels_like: current.apparent_temperature_c,
            humidity: current.relative_humidity_pct,
            wind_speed: current.wind_speed_kph,
            wind_gust: current.wind_gust_kph,
            conditions: condition_label(current.weather_code).to_string(),
            location: place.display_name.clone(),
        }
    }
}

/// Everything gathered during one lookup; the summary plus the records it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub place: GeocodeResult,
    pub current: CurrentConditions,
    pub summary: WeatherSummary,
}

impl WeatherReport {
    pub fn new(place: GeocodeResult, current: CurrentConditions) -> Self {
        let summary = WeatherSummary::from_parts(&place, &current);
        Self { place, current, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tokyo() -> GeocodeResult {
        GeocodeResult { latitude: 35.6895, longitude: 139.6917, display_name: "Tokyo".into() }
    }

    fn conditions(code: i64) -> CurrentConditions {
        CurrentConditions {
            observed_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            temperature_c: 22.5,
            apparent_temperature_c: 23.1,
            relative_humidity_pct: 64.0,
            wind_speed_kph: 11.2,
            wind_gust_kph: 24.8,
            weather_code: code,
        }
    }

    #[test]
    fn summary_copies_numbers_verbatim() {
        let summary = WeatherSummary::from_parts(&tokyo(), &conditions(1));

        assert_eq!(summary.temperature, 22.5);
        assert_eq!(summary.feels_like, 23.1);
        assert_eq!(summary.humidity, 64.0);
        assert_eq!(summary.wind_speed, 11.2);
        assert_eq!(summary.wind_gust, 24.8);
        assert_eq!(summary.conditions, "Mainly clear");
        assert_eq!(summary.location, "Tokyo");
    }

    #[test]
    fn summary_with_unmapped_code() {
        let summary = WeatherSummary::from_parts(&tokyo(), &conditions(999));
        assert_eq!(summary.conditions, "Unknown");
    }

    #[test]
    fn summary_serializes_with_tool_field_names() {
        let summary = WeatherSummary::from_parts(&tokyo(), &conditions(0));
        let json = serde_json::to_value(&summary).unwrap();

        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        for key in
            ["temperature", "feelsLike", "humidity", "windSpeed", "windGust", "conditions", "location"]
        {
            assert!(keys.contains(&key), "missing {key} in {json}");
        }
        assert_eq!(keys.len(), 7);
        assert_eq!(json["conditions"], "Clear sky");
    }

    #[test]
    fn input_rejects_missing_location() {
        let parsed = serde_json::from_value::<WeatherInput>(serde_json::json!({ "city": "Oslo" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn report_builds_summary_from_its_parts() {
        let report = WeatherReport::new(tokyo(), conditions(3));
        assert_eq!(report.summary.location, report.place.display_name);
        assert_eq!(report.summary.conditions, "Overcast");
    }
}
