pub mod cache;
pub mod geocoder;
pub mod resolver;
pub mod weather;


pub use cache::WeatherCache;
pub use geocoder::{Geocoder, OpenMeteoGeocoder};
pub use resolver::{normalize_city_key, WeatherResolver};
pub use weather::{OpenMeteoForecast, WeatherSource};

use std::time::Duration;

/// Shared HTTP client for both upstreams; every call is bounded by `request_timeout`.
pub fn build_http_client(
    request_timeout: Duration,
    connect_timeout: Duration,
) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        .user_agent(concat!("clima-gateway/", env!("CARGO_PKG_VERSION")))
        .build()
}
