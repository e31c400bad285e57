//! WMO weather interpretation codes as reported by Open-Meteo.
//!
//! See <https://open-meteo.com/en/docs> ("WMO Weather interpretation codes").

/// Label returned for any code missing from [`WEATHER_CODES`].
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Fixed code → label table.
pub const WEATHER_CODES: &[(i64, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Foggy"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Dense freezing drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Slight snow fall"),
    (73, "Moderate snow fall"),
    (75, "Heavy snow fall"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

/// Map a weather code to its human-readable label.
///
/// Total over all integers: codes outside the table yield [`UNKNOWN_CONDITION`].
pub fn condition_label(code: i64) -> &'static str {
    WEATHER_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_CONDITION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(condition_label(0), "Clear sky");
        assert_eq!(condition_label(1), "Mainly clear");
        assert_eq!(condition_label(3), "Overcast");
        assert_eq!(condition_label(48), "Depositing rime fog");
        assert_eq!(condition_label(66), "Light freezing rain");
        assert_eq!(condition_label(82), "Violent rain showers");
        assert_eq!(condition_label(99), "Thunderstorm with heavy hail");
    }

    #[test]
    fn every_table_entry_resolves_to_its_label() {
        for (code, label) in WEATHER_CODES {
            assert_eq!(condition_label(*code), *label, "code {code}");
        }
    }

    #[test]
    fn unknown_codes() {
        assert_eq!(condition_label(999), UNKNOWN_CONDITION);
        assert_eq!(condition_label(4), UNKNOWN_CONDITION);
        assert_eq!(condition_label(-1), UNKNOWN_CONDITION);
        assert_eq!(condition_label(i64::MAX), UNKNOWN_CONDITION);
    }

    #[test]
    fn table_has_no_duplicate_codes() {
        let mut codes: Vec<i64> = WEATHER_CODES.iter().map(|(c, _)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), WEATHER_CODES.len());
    }
}
