//! REST API routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use refuel_core::providers::{DirectionsError, GeocodeError};
use refuel_core::{plan_route, PlannerConfig, RoutePlan};

use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new().route("/v1/route", get(plan_route_handler))
}

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    start: Option<String>,
    end: Option<String>,
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

/// Plan a fuel-optimized route between two place names.
///
/// Collaborator order is fixed: geocode both endpoints, fetch the driving
/// polyline, snapshot the station catalog, run the pure planner, then render
/// the map. Everything up to the planner can fail the request; rendering
/// cannot.
async fn plan_route_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RoutePlan>, ApiError> {
    let start = query.start.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let end = query.end.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let (Some(start), Some(end)) = (start, end) else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Missing start or end location",
        ));
    };

    let start_point = state
        .geocoder
        .geocode(start)
        .await
        .map_err(map_geocode_error)?;
    let end_point = state.geocoder.geocode(end).await.map_err(map_geocode_error)?;

    let polyline = state
        .directions
        .directions(start_point, end_point)
        .await
        .map_err(|err| match err {
            DirectionsError::NoRoute => api_error(
                StatusCode::NOT_FOUND,
                "No drivable route between the given locations",
            ),
            DirectionsError::Provider(msg) => {
                tracing::error!("Directions request failed: {}", msg);
                api_error(StatusCode::BAD_GATEWAY, "Directions provider failure")
            }
        })?;

    let catalog = state.catalog.load_stations().await.map_err(|err| {
        tracing::error!("Failed to load station catalog: {}", err);
        api_error(StatusCode::SERVICE_UNAVAILABLE, "Station catalog unavailable")
    })?;

    let mut plan = plan_route(&polyline, &catalog, &PlannerConfig::default())
        .map_err(|err| api_error(StatusCode::UNPROCESSABLE_ENTITY, err.to_string()))?;

    // Rendering is presentational; a failure degrades to a plan without a map.
    match state.renderer.render(&polyline, &plan.stops) {
        Ok(url) => plan.map_url = Some(url),
        Err(err) => tracing::warn!("Map rendering failed, returning plan without map: {}", err),
    }

    Ok(Json(plan))
}

fn map_geocode_error(err: GeocodeError) -> ApiError {
    match err {
        GeocodeError::NotFound(place) => api_error(
            StatusCode::NOT_FOUND,
            format!("Could not resolve location '{}'", place),
        ),
        GeocodeError::Provider(msg) => {
            tracing::error!("Geocoding failed: {}", msg);
            api_error(StatusCode::BAD_GATEWAY, "Geocoding provider failure")
        }
    }
}
