use crate::error::WeatherError;
use crate::models::{GeocodeResult, GeocodingApiResponse};
use async_trait::async_trait;
use log::{debug, info};

/// Resolves a free-text place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, location: &str) -> Result<GeocodeResult, WeatherError>;
}

#[derive(Clone)]
pub struct GeocodingClient {
    base_url: String,
    client: reqwest::Client,
}

impl GeocodingClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl Geocoder for GeocodingClient {
    async fn resolve(&self, location: &str) -> Result<GeocodeResult, WeatherError> {
        info!("📍 Geocoding location: {}", location);

        // reqwest percent-encodes query values
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("name", location), ("count", "1")])
            .send()
            .await
            .map_err(|e| WeatherError::UpstreamUnavailable(format!("Geocoding request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::UpstreamUnavailable(format!("Failed to read geocoding response: {}", e)))?;

        if !status.is_success() {
            debug!("Geocoding error body: {}", body);
            return Err(WeatherError::UpstreamUnavailable(format!(
                "Geocoding API returned status {}",
                status
            )));
        }

        let parsed: GeocodingApiResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::UpstreamMalformed(format!("Failed to parse geocoding response: {}", e)))?;

        let place = parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::LocationNotFound(location.to_string()))?;

        let result = GeocodeResult::from(place);
        info!(
            "✅ Resolved {} to {} ({}, {})",
            location,
            result.display_name(),
            result.latitude,
            result.longitude
        );

        Ok(result)
    }
}
