use std::convert::Infallible;
use std::sync::Arc;
use http::Method;
use hyper::StatusCode;
use warp::{Filter, Reply};
use crate::config::Config;
use crate::handlers;
use crate::middleware::cors_headers;
use crate::services::{
    build_http_client, OpenMeteoForecast, OpenMeteoGeocoder, WeatherCache, WeatherResolver,
};

/// Wires the cache and both Open-Meteo clients from `config`.
pub fn build_resolver(config: &Config) -> Result<Arc<WeatherResolver>, reqwest::Error> {
    let client = build_http_client(config.request_timeout, config.connect_timeout)?;
    let cache = Arc::new(WeatherCache::new(config.cache_capacity, config.cache_ttl));
    let geocoder = OpenMeteoGeocoder::new(client.clone(), config.geocoding_url.clone())
        .with_language(config.geocoding_language.clone());
    let forecast = OpenMeteoForecast::new(client, config.forecast_url.clone());

    Ok(Arc::new(WeatherResolver::new(
        cache,
        Arc::new(geocoder),
        Arc::new(forecast),
    )))
}

pub fn routes(
    resolver: Arc<WeatherResolver>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let resolver_filter = warp::any().map(move || resolver.clone());

    let health_check = warp::path!("health")
        .and(warp::get())
        .and_then(handlers::health);

    let weather = warp::path!("weather" / String)
        .and(warp::get())
        .and(resolver_filter)
        .and_then(handlers::get_weather);

    // Answers CORS preflight on any path; other methods fall through as not found.
    let preflight = warp::method().and_then(|method: Method| async move {
        if method == Method::OPTIONS {
            Ok(StatusCode::NO_CONTENT)
        } else {
            Err(warp::reject::not_found())
        }
    });

    health_check
        .or(weather)
        .or(preflight)
        .recover(handlers::handle_rejection)
        .with(warp::reply::with::headers(cors_headers()))
        .with(warp::log::custom(|info| {
            tracing::info!(
                "{} {} {} {}ms",
                info.method(),
                info.path(),
                info.status().as_u16(),
                info.elapsed().as_millis()
            );
        }))
}

pub async fn serve(config: &Config, resolver: Arc<WeatherResolver>) -> Result<(), warp::Error> {
    let (addr, server) = warp::serve(routes(resolver)).try_bind_with_graceful_shutdown(
        config.bind_addr,
        async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        },
    )?;

    tracing::info!("Clima gateway running on http://{}", addr);
    server.await;
    tracing::info!("Clima gateway stopped");
    Ok(())
}
