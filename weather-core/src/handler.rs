use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{error::StoreError, service::WeatherQuery};

/// Router exposing `GET /{city}`.
pub fn router(weather: Arc<dyn WeatherQuery>) -> Router {
    Router::new()
        .route("/{city}", get(get_city))
        .layer(TraceLayer::new_for_http())
        .with_state(weather)
}

async fn get_city(
    State(weather): State<Arc<dyn WeatherQuery>>,
    Path(city): Path<String>,
) -> Response {
    match weather.get(&city).await {
        Ok(weather) => (StatusCode::OK, Json(weather)).into_response(),
        Err(StoreError::NotFound(_)) => {
            tracing::debug!(%city, "no readings for requested city");
            (StatusCode::NOT_FOUND, "no weather data for this city").into_response()
        }
        Err(e) => {
            tracing::error!(%city, error = %e, "failed to fetch weather");
            (StatusCode::INTERNAL_SERVER_ERROR, "error fetching weather").into_response()
        }
    }
}
