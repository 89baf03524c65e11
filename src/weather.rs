use crate::error::WeatherError;
use crate::models::{ArchiveApiResponse, DailyWeatherRecord};
use async_trait::async_trait;
use log::{debug, info};

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode";

/// Historical daily observations for a coordinate.
#[async_trait]
pub trait WeatherArchive: Send + Sync {
    async fn daily(
        &self,
        latitude: f64,
        longitude: f64,
        date: &str,
    ) -> Result<DailyWeatherRecord, WeatherError>;
}

#[derive(Clone)]
pub struct ArchiveClient {
    base_url: String,
    client: reqwest::Client,
}

impl ArchiveClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl WeatherArchive for ArchiveClient {
    async fn daily(
        &self,
        latitude: f64,
        longitude: f64,
        date: &str,
    ) -> Result<DailyWeatherRecord, WeatherError> {
        let latitude_param = format!("{:.6}", latitude);
        let longitude_param = format!("{:.6}", longitude);

        info!(
            "🌐 Fetching archive weather for {} at ({}, {})",
            date, latitude_param, longitude_param
        );

        // Single-day range; the archive picks the timezone from the coordinates.
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude_param.as_str()),
                ("longitude", longitude_param.as_str()),
                ("start_date", date),
                ("end_date", date),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::UpstreamUnavailable(format!("Archive request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::UpstreamUnavailable(format!("Failed to read archive response: {}", e)))?;

        if !status.is_success() {
            debug!("Archive error body: {}", body);
            return Err(WeatherError::UpstreamUnavailable(format!(
                "Archive API returned status {}",
                status
            )));
        }

        let parsed: ArchiveApiResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::UpstreamMalformed(format!("Failed to parse archive response: {}", e)))?;

        let record = parsed
            .daily
            .first_record()
            .ok_or_else(|| WeatherError::NoDataForDate {
                date: date.to_string(),
                latitude,
                longitude,
            })?;

        debug!(
            "Archive record for {}: max {}°C, min {}°C, code {}",
            date, record.temperature_max, record.temperature_min, record.weather_code
        );

        Ok(record)
    }
}
