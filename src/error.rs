use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

pub const MISSING_PARAMS_MESSAGE: &str = "Missing date or location parameter";
pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to get weather data";

/// Failures on the request path. The kind is kept for logging even though
/// every kind except `InvalidRequest` reaches the caller as the same 500.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Location not found: {0}")]
    LocationNotFound(String),
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("Upstream response malformed: {0}")]
    UpstreamMalformed(String),
    #[error("No weather data for {date} at ({latitude}, {longitude})")]
    NoDataForDate {
        date: String,
        latitude: f64,
        longitude: f64,
    },
}

impl WeatherError {
    /// Short label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::InvalidRequest(_) => "invalid_request",
            WeatherError::LocationNotFound(_) => "location_not_found",
            WeatherError::UpstreamUnavailable(_) => "upstream_unavailable",
            WeatherError::UpstreamMalformed(_) => "upstream_malformed",
            WeatherError::NoDataForDate { .. } => "no_data_for_date",
        }
    }
}

impl ResponseError for WeatherError {
    fn error_response(&self) -> HttpResponse {
        let message = match self {
            WeatherError::InvalidRequest(_) => MISSING_PARAMS_MESSAGE,
            _ => LOOKUP_FAILED_MESSAGE,
        };

        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(message)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            WeatherError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            WeatherError::LocationNotFound(_)
            | WeatherError::UpstreamUnavailable(_)
            | WeatherError::UpstreamMalformed(_)
            | WeatherError::NoDataForDate { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Startup and process-level failures. Any of these ends the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Network interface error: {0}")]
    Network(String),
    #[error("HTTP client error: {0}")]
    Http(String),
    #[error("Weather lookup error: {0}")]
    Weather(#[from] WeatherError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
