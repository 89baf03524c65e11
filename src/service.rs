use crate::conditions;
use crate::error::WeatherError;
use crate::geocoding::Geocoder;
use crate::models::WeatherResponse;
use crate::weather::WeatherArchive;
use log::info;
use std::sync::Arc;

/// Geocode, then look up the archive for the resolved coordinates.
#[derive(Clone)]
pub struct WeatherService {
    geocoder: Arc<dyn Geocoder>,
    archive: Arc<dyn WeatherArchive>,
}

impl WeatherService {
    pub fn new(geocoder: Arc<dyn Geocoder>, archive: Arc<dyn WeatherArchive>) -> Self {
        Self { geocoder, archive }
    }

    /// The date is passed through to the archive and echoed back unchecked.
    pub async fn get_weather(&self, date: &str, location: &str) -> Result<WeatherResponse, WeatherError> {
        let place = self.geocoder.resolve(location).await?;
        let record = self
            .archive
            .daily(place.latitude, place.longitude, date)
            .await?;

        let response = WeatherResponse {
            date: date.to_string(),
            location: place.display_name(),
            temperature: record.mean_fahrenheit(),
            condition: conditions::describe(record.weather_code).to_string(),
        };

        info!(
            "✅ Weather for {} on {}: {:.1}°F, {}",
            response.location, response.date, response.temperature, response.condition
        );

        Ok(response)
    }
}
