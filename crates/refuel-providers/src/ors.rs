//! OpenRouteService directions client.

use std::time::Duration;

use async_trait::async_trait;
use refuel_core::providers::{DirectionsError, DirectionsProvider};
use refuel_core::{GeoPoint, Polyline};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const DRIVING_PROFILE: &str = "driving-car";

/// HTTP client for the OpenRouteService directions API.
#[derive(Debug, Clone)]
pub struct OrsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OrsClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[derive(Debug, Serialize)]
struct DirectionsRequest {
    coordinates: [[f64; 2]; 2],
}

#[derive(Debug, Deserialize)]
struct GeoJsonResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<[f64; 2]>,
}

fn decode_polyline(response: GeoJsonResponse) -> Result<Polyline, DirectionsError> {
    let geometry = response
        .features
        .into_iter()
        .next()
        .ok_or(DirectionsError::NoRoute)?
        .geometry;
    if geometry.coordinates.len() < 2 {
        return Err(DirectionsError::NoRoute);
    }
    // GeoJSON coordinate order is [lon, lat].
    let points = geometry
        .coordinates
        .into_iter()
        .map(|[lon, lat]| GeoPoint::new(lat, lon))
        .collect();
    Ok(Polyline::new(points))
}

#[async_trait]
impl DirectionsProvider for OrsClient {
    async fn directions(
        &self,
        start: GeoPoint,
        end: GeoPoint,
    ) -> Result<Polyline, DirectionsError> {
        let url = format!(
            "{}/v2/directions/{}/geojson",
            self.base_url, DRIVING_PROFILE
        );
        tracing::debug!(
            "Requesting directions ({}, {}) -> ({}, {})",
            start.lat,
            start.lon,
            end.lat,
            end.lon
        );

        let request = DirectionsRequest {
            coordinates: [[start.lon, start.lat], [end.lon, end.lat]],
        };

        let response: GeoJsonResponse = self
            .client
            .post(url)
            .header("Authorization", &self.api_key)
            .json(&request)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| DirectionsError::Provider(err.to_string()))?
            .json()
            .await
            .map_err(|err| DirectionsError::Provider(err.to_string()))?;

        decode_polyline(response)
    }
}
