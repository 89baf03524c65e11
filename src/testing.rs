// Stub collaborators shared by the service and handler tests.
use crate::error::WeatherError;
use crate::geocoding::Geocoder;
use crate::models::{DailyWeatherRecord, GeocodeResult};
use crate::weather::WeatherArchive;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn paris() -> GeocodeResult {
    GeocodeResult {
        name: "Paris".into(),
        country: "France".into(),
        latitude: 48.85341,
        longitude: 2.3488,
    }
}

pub struct StubGeocoder {
    result: Option<GeocodeResult>,
    calls: AtomicUsize,
    last_location: Mutex<Option<String>>,
}

impl StubGeocoder {
    pub fn found(result: GeocodeResult) -> Self {
        Self {
            result: Some(result),
            calls: AtomicUsize::new(0),
            last_location: Mutex::new(None),
        }
    }

    pub fn not_found() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
            last_location: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_location(&self) -> Option<String> {
        self.last_location.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn resolve(&self, location: &str) -> Result<GeocodeResult, WeatherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_location.lock().unwrap() = Some(location.to_string());
        self.result
            .clone()
            .ok_or_else(|| WeatherError::LocationNotFound(location.to_string()))
    }
}

pub struct StubArchive {
    record: Option<DailyWeatherRecord>,
    calls: AtomicUsize,
    last_request: Mutex<Option<(f64, f64, String)>>,
}

impl StubArchive {
    pub fn record(max: f64, min: f64, code: i32) -> Self {
        Self {
            record: Some(DailyWeatherRecord {
                temperature_max: max,
                temperature_min: min,
                weather_code: code,
            }),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn empty() -> Self {
        Self {
            record: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(f64, f64, String)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherArchive for StubArchive {
    async fn daily(
        &self,
        latitude: f64,
        longitude: f64,
        date: &str,
    ) -> Result<DailyWeatherRecord, WeatherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((latitude, longitude, date.to_string()));
        self.record.ok_or_else(|| WeatherError::NoDataForDate {
            date: date.to_string(),
            latitude,
            longitude,
        })
    }
}
