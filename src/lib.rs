pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;

pub use config::Config;
pub use errors::{GatewayError, Upstream};
pub use models::{CompositeWeatherResult, Location, WeatherSnapshot};
pub use services::WeatherResolver;
