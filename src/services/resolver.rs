use crate::errors::GatewayError;
use crate::models::CompositeWeatherResult;
use crate::services::{Geocoder, WeatherCache, WeatherSource};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;

/// Cache key for a raw city string: surrounding whitespace trimmed, lower-cased.
pub fn normalize_city_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Cache lookup, then geocoding and weather on a miss.
///
/// Concurrent misses for the same key are not coalesced: each performs its own
/// upstream calls and the last `put` wins.
pub struct WeatherResolver {
    cache: Arc<WeatherCache>,
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherSource>,
}

impl WeatherResolver {
    pub fn new(
        cache: Arc<WeatherCache>,
        geocoder: Arc<dyn Geocoder>,
        weather: Arc<dyn WeatherSource>,
    ) -> Self {
        Self {
            cache,
            geocoder,
            weather,
        }
    }

    pub fn cache(&self) -> &Arc<WeatherCache> {
        &self.cache
    }

    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, raw_city: &str) -> Result<CompositeWeatherResult, GatewayError> {
        let key = normalize_city_key(raw_city);

        if let Some(cached) = self.cache.get(&key).await {
            tracing::info!("Cache hit for: {}", raw_city);
            return Ok(cached);
        }
        tracing::debug!("Cache miss for: {}", key);

        // The geocoder gets the city as typed; only the cache key is normalized.
        let location = self
            .geocoder
            .lookup(raw_city)
            .await
            .map_err(log_upstream)?
            .ok_or_else(|| GatewayError::NotFound(raw_city.to_string()))?;

        let snapshot = self
            .weather
            .fetch_current(location.latitude, location.longitude)
            .await
            .map_err(log_upstream)?;

        let result = CompositeWeatherResult {
            city: location.display_label(),
            latitude: location.latitude,
            longitude: location.longitude,
            data: snapshot,
            retrieved_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        };

        self.cache.put(&key, result.clone()).await;
        Ok(result)
    }
}

fn log_upstream(err: GatewayError) -> GatewayError {
    tracing::error!("{}", err);
    err
}
