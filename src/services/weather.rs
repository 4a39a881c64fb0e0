use crate::errors::{GatewayError, Upstream};
use crate::models::WeatherSnapshot;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,is_day,precipitation,rain,weather_code,wind_speed_10m";

/// Coordinates → current conditions.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, GatewayError>;
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<i64>,
    wind_speed_10m: Option<f64>,
    precipitation: Option<f64>,
    is_day: Option<i64>,
    weather_code: Option<i64>,
}

impl CurrentBlock {
    // Only precipitation has a default; anything else missing is a broken payload.
    fn into_snapshot(self) -> Result<WeatherSnapshot, GatewayError> {
        fn required<T>(value: Option<T>, field: &str) -> Result<T, GatewayError> {
            value.ok_or_else(|| {
                GatewayError::upstream(Upstream::Weather, format!("current block without {}", field))
            })
        }

        Ok(WeatherSnapshot {
            temperature: required(self.temperature_2m, "temperature_2m")?,
            humidity: required(self.relative_humidity_2m, "relative_humidity_2m")?,
            wind_speed: required(self.wind_speed_10m, "wind_speed_10m")?,
            precipitation: self.precipitation.unwrap_or(0.0),
            is_day: required(self.is_day, "is_day")?,
            condition_code: required(self.weather_code, "weather_code")?,
        })
    }
}

/// Open-Meteo forecast endpoint, current conditions only, timezone auto-detected.
#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    client: Client,
    endpoint: String,
}

impl OpenMeteoForecast {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoForecast {
    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, GatewayError> {
        let fail = |e: reqwest::Error| GatewayError::upstream(Upstream::Weather, e);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(fail)?
            .error_for_status()
            .map_err(fail)?;

        let body: ForecastResponse = response.json().await.map_err(fail)?;
        body.current
            .ok_or_else(|| GatewayError::upstream(Upstream::Weather, "response without current block"))?
            .into_snapshot()
    }
}
