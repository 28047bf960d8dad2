//! Nominatim geocoding client.

use std::time::Duration;

use async_trait::async_trait;
use refuel_core::providers::{GeocodeError, Geocoder};
use refuel_core::GeoPoint;
use reqwest::Client;
use serde::Deserialize;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the Nominatim search API.
///
/// Nominatim's usage policy requires an identifying User-Agent, so the
/// header is mandatory at construction.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: impl AsRef<str>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent.as_ref())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

/// Nominatim returns coordinates as JSON strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

fn hit_to_point(hit: SearchHit) -> Result<GeoPoint, GeocodeError> {
    let lat = hit
        .lat
        .parse::<f64>()
        .map_err(|err| GeocodeError::Provider(format!("bad latitude '{}': {}", hit.lat, err)))?;
    let lon = hit
        .lon
        .parse::<f64>()
        .map_err(|err| GeocodeError::Provider(format!("bad longitude '{}': {}", hit.lon, err)))?;
    Ok(GeoPoint::new(lat, lon))
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, place: &str) -> Result<GeoPoint, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!("Geocoding '{}' via {}", place, url);

        let hits: Vec<SearchHit> = self
            .client
            .get(url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| GeocodeError::Provider(err.to_string()))?
            .json()
            .await
            .map_err(|err| GeocodeError::Provider(err.to_string()))?;

        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(place.to_string()))?;
        hit_to_point(hit)
    }
}
