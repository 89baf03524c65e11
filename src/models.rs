use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string accepted by `GET /weather`. Missing keys become empty
/// strings so that absence and emptiness fail the same validation.
#[derive(Debug, Clone, Default, Validate)]
pub struct WeatherQuery {
    #[validate(length(min = 1))]
    pub date: String,
    #[validate(length(min = 1))]
    pub location: String,
}

impl WeatherQuery {
    /// Takes the first value of each key; repeated keys are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        };

        Self {
            date: first("date"),
            location: first("location"),
        }
    }
}

/// First match returned by the geocoding service.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeocodeResult {
    /// `"<name>, <country>"`, or just the name when the match has no country.
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// One day of archive observations, temperatures in Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyWeatherRecord {
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub weather_code: i32,
}

impl DailyWeatherRecord {
    /// Mean of the daily max and min, converted to Fahrenheit.
    pub fn mean_fahrenheit(&self) -> f64 {
        let mean = (self.temperature_max + self.temperature_min) / 2.0;
        mean * 9.0 / 5.0 + 32.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub date: String,
    pub location: String,
    pub temperature: f64,
    pub condition: String,
}

// ==================== Upstream payloads ====================

#[derive(Debug, Deserialize)]
pub struct GeocodingApiResponse {
    // Omitted entirely by the provider when nothing matches.
    #[serde(default)]
    pub results: Vec<GeocodingApiPlace>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingApiPlace {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
}

impl From<GeocodingApiPlace> for GeocodeResult {
    fn from(place: GeocodingApiPlace) -> Self {
        Self {
            name: place.name,
            country: place.country.unwrap_or_default(),
            latitude: place.latitude,
            longitude: place.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ArchiveApiResponse {
    #[serde(default)]
    pub daily: ArchiveDaily,
}

/// Parallel daily series. The archive reports a missing observation as `null`.
#[derive(Debug, Default, Deserialize)]
pub struct ArchiveDaily {
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub weathercode: Vec<Option<i32>>,
}

impl ArchiveDaily {
    /// First day of the series, if every field has a value for it.
    pub fn first_record(&self) -> Option<DailyWeatherRecord> {
        Some(DailyWeatherRecord {
            temperature_max: (*self.temperature_2m_max.first()?)?,
            temperature_min: (*self.temperature_2m_min.first()?)?,
            weather_code: (*self.weathercode.first()?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn fahrenheit_uses_the_mean_of_max_and_min() {
        let record = DailyWeatherRecord {
            temperature_max: 20.0,
            temperature_min: 10.0,
            weather_code: 0,
        };
        assert_eq!(record.mean_fahrenheit(), 59.0);
    }

    #[test]
    fn freezing_mean_is_thirty_two() {
        let record = DailyWeatherRecord {
            temperature_max: 5.0,
            temperature_min: -5.0,
            weather_code: 71,
        };
        assert_eq!(record.mean_fahrenheit(), 32.0);
    }

    #[test]
    fn display_name_joins_name_and_country() {
        let geo = GeocodeResult {
            name: "Paris".into(),
            country: "France".into(),
            latitude: 48.85341,
            longitude: 2.3488,
        };
        assert_eq!(geo.display_name(), "Paris, France");

        let no_country = GeocodeResult {
            country: String::new(),
            ..geo
        };
        assert_eq!(no_country.display_name(), "Paris");
    }

    #[test]
    fn query_takes_the_first_of_repeated_keys() {
        let pairs: Vec<(String, String)> = [
            ("date", "2024-06-01"),
            ("location", "Paris"),
            ("location", "Lyon"),
            ("date", "2024-06-02"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let query = WeatherQuery::from_pairs(&pairs);
        assert_eq!(query.date, "2024-06-01");
        assert_eq!(query.location, "Paris");
        assert!(query.validate().is_ok());

        let empty_first = vec![
            ("date".to_string(), "2024-06-01".to_string()),
            ("location".to_string(), String::new()),
            ("location".to_string(), "Lyon".to_string()),
        ];
        assert!(WeatherQuery::from_pairs(&empty_first).validate().is_err());
    }

    #[test]
    fn query_requires_both_fields() {
        let ok = WeatherQuery {
            date: "2024-06-01".into(),
            location: "Paris".into(),
        };
        assert!(ok.validate().is_ok());

        let missing_location = WeatherQuery {
            date: "2024-06-01".into(),
            location: String::new(),
        };
        assert!(missing_location.validate().is_err());

        assert!(WeatherQuery::default().validate().is_err());
    }

    #[test]
    fn first_record_rejects_nulls_and_short_series() {
        let daily: ArchiveDaily = serde_json::from_value(serde_json::json!({
            "time": ["2024-06-01"],
            "temperature_2m_max": [null],
            "temperature_2m_min": [14.0],
            "weathercode": [1]
        }))
        .unwrap();
        assert_eq!(daily.first_record(), None);

        let short: ArchiveDaily = serde_json::from_value(serde_json::json!({
            "time": ["2024-06-01"],
            "temperature_2m_max": [22.0],
            "temperature_2m_min": [14.0],
            "weathercode": []
        }))
        .unwrap();
        assert_eq!(short.first_record(), None);
    }

    #[test]
    fn geocoding_payload_without_results_is_empty() {
        let parsed: GeocodingApiResponse =
            serde_json::from_str(r#"{"generationtime_ms":0.4}"#).unwrap();
        assert!(parsed.results.is_empty());
    }
}
