use std::convert::Infallible;
use std::sync::Arc;
use hyper::StatusCode;
use serde_json::json;
use warp::Reply;
use crate::errors::GatewayError;
use crate::services::WeatherResolver;


pub async fn health() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&json!({ "status": "ok" })))
}

pub async fn get_weather(
    city: String,
    resolver: Arc<WeatherResolver>,
) -> Result<impl warp::Reply, warp::Rejection> {
    // Path segments arrive percent-encoded ("S%C3%A3o%20Paulo").
    let city = match urlencoding::decode(&city) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => city.clone(),
    };

    let result = resolver
        .resolve(&city)
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&result))
}

pub fn error_reply(code: StatusCode, detail: &str) -> warp::reply::Response {
    warp::reply::with_status(warp::reply::json(&json!({ "detail": detail })), code).into_response()
}

pub async fn handle_rejection(err: warp::Rejection) -> Result<impl warp::Reply, Infallible> {
    let reply = if err.is_not_found() {
        error_reply(StatusCode::NOT_FOUND, "Not Found")
    } else if let Some(e) = err.find::<GatewayError>() {
        match e {
            GatewayError::NotFound(_) => error_reply(StatusCode::NOT_FOUND, &e.to_string()),
            GatewayError::UpstreamUnavailable { upstream, .. } => {
                error_reply(StatusCode::SERVICE_UNAVAILABLE, upstream.detail())
            }
        }
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        error_reply(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    };

    Ok(reply)
}
