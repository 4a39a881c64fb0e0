use clima_gateway::{config::Config, server};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(upstream: &MockServer) -> Config {
    Config {
        geocoding_url: format!("{}/v1/search", upstream.uri()),
        forecast_url: format!("{}/v1/forecast", upstream.uri()),
        request_timeout: Duration::from_secs(2),
        ..Config::default()
    }
}

async fn mount_curitiba(upstream: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("count", "1"))
        .and(query_param("language", "pt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "name": "Curitiba", "admin1": "Paraná", "country_code": "BR",
                "latitude": -25.43, "longitude": -49.27
            }]
        })))
        .expect(expected_calls)
        .mount(upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "-25.43"))
        .and(query_param("longitude", "-49.27"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": {
                "temperature_2m": 22.5, "relative_humidity_2m": 60,
                "wind_speed_10m": 12.0, "is_day": 1, "weather_code": 3
            }
        })))
        .expect(expected_calls)
        .mount(upstream)
        .await;
}

fn body_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let upstream = MockServer::start().await;
    let routes = server::routes(server::build_resolver(&config_for(&upstream)).unwrap());

    let resp = warp::test::request().method("GET").path("/health").reply(&routes).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp.body()), json!({ "status": "ok" }));
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_weather_for_city() {
    let upstream = MockServer::start().await;
    mount_curitiba(&upstream, 1).await;
    let routes = server::routes(server::build_resolver(&config_for(&upstream)).unwrap());

    let resp = warp::test::request()
        .method("GET")
        .path("/weather/Curitiba")
        .reply(&routes)
        .await;

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    let body = body_json(resp.body());
    assert_eq!(body["city"], "Curitiba, Paraná - BR");
    assert_eq!(body["latitude"], -25.43);
    assert_eq!(body["longitude"], -49.27);
    assert_eq!(
        body["data"],
        json!({
            "temperature": 22.5, "humidity": 60, "wind_speed": 12.0,
            "precipitation": 0.0, "is_day": 1, "condition_code": 3
        })
    );
    assert!(body["retrieved_at"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_weather_served_from_cache() {
    let upstream = MockServer::start().await;
    mount_curitiba(&upstream, 1).await;
    let routes = server::routes(server::build_resolver(&config_for(&upstream)).unwrap());

    let first = warp::test::request()
        .path("/weather/Curitiba")
        .reply(&routes)
        .await;
    let second = warp::test::request()
        .path("/weather/%20CURITIBA%20")
        .reply(&routes)
        .await;

    assert_eq!(first.status(), 200);
    assert_eq!(second.status(), 200);
    assert_eq!(first.body(), second.body());
    upstream.verify().await;
}

#[tokio::test]
async fn test_weather_decodes_city_segment() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "São Paulo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&upstream)
        .await;
    let routes = server::routes(server::build_resolver(&config_for(&upstream)).unwrap());

    let resp = warp::test::request()
        .path("/weather/S%C3%A3o%20Paulo")
        .reply(&routes)
        .await;

    assert_eq!(resp.status(), 404);
    assert_eq!(
        body_json(resp.body()),
        json!({ "detail": "Cidade 'São Paulo' não encontrada." })
    );
}

#[tokio::test]
async fn test_geocoding_unavailable() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&upstream)
        .await;
    let routes = server::routes(server::build_resolver(&config_for(&upstream)).unwrap());

    let resp = warp::test::request()
        .path("/weather/Curitiba")
        .reply(&routes)
        .await;

    assert_eq!(resp.status(), 503);
    assert_eq!(
        body_json(resp.body()),
        json!({ "detail": "Serviço de localização indisponível" })
    );
}

#[tokio::test]
async fn test_weather_unavailable() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "name": "Curitiba", "latitude": -25.43, "longitude": -49.27 }]
        })))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&upstream)
        .await;
    let routes = server::routes(server::build_resolver(&config_for(&upstream)).unwrap());

    for _ in 0..2 {
        let resp = warp::test::request()
            .path("/weather/Curitiba")
            .reply(&routes)
            .await;
        assert_eq!(resp.status(), 503);
        assert_eq!(
            body_json(resp.body()),
            json!({ "detail": "Serviço de clima indisponível" })
        );
    }
    // Failures are not cached, so the forecast endpoint was hit twice.
    upstream.verify().await;
}

#[tokio::test]
async fn test_unknown_route() {
    let upstream = MockServer::start().await;
    let routes = server::routes(server::build_resolver(&config_for(&upstream)).unwrap());

    let resp = warp::test::request().path("/forecast/Curitiba").reply(&routes).await;

    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp.body()), json!({ "detail": "Not Found" }));
}

#[tokio::test]
async fn test_wrong_method() {
    let upstream = MockServer::start().await;
    let routes = server::routes(server::build_resolver(&config_for(&upstream)).unwrap());

    let resp = warp::test::request()
        .method("POST")
        .path("/weather/Curitiba")
        .reply(&routes)
        .await;

    assert_eq!(resp.status(), 405);
}

#[tokio::test]
async fn test_cors_preflight() {
    let upstream = MockServer::start().await;
    let routes = server::routes(server::build_resolver(&config_for(&upstream)).unwrap());

    let resp = warp::test::request()
        .method("OPTIONS")
        .path("/weather/Curitiba")
        .header("origin", "https://painel.example.com")
        .header("access-control-request-method", "GET")
        .reply(&routes)
        .await;

    assert_eq!(resp.status(), 204);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    assert_eq!(resp.headers()["access-control-allow-headers"], "*");
}
