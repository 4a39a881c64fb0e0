use std::time::Instant;
use serde::{Deserialize, Serialize};

/// Best geocoding match for a city name.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub admin1: String,
    pub country_code: String,
}

impl Location {
    /// Always three parts, `"{name}, {region} - {country}"`, even when a part is empty.
    pub fn display_label(&self) -> String {
        format!("{}, {} - {}", self.name, self.admin1, self.country_code)
    }
}

/// Current conditions as returned to clients under `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub humidity: i64,
    pub wind_speed: f64,
    pub precipitation: f64,
    pub is_day: i64,
    pub condition_code: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeWeatherResult {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub data: WeatherSnapshot,
    pub retrieved_at: String,
}

pub struct CacheEntry {
    pub value: CompositeWeatherResult,
    pub inserted_at: Instant,
    pub seq: u64,
}
