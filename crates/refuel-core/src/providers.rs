//! Interfaces to the external collaborators the planner depends on.
//!
//! The core never talks to the network or a database itself; the boundary
//! layer hands it a polyline and a catalog snapshot obtained through these
//! traits. Each trait is deliberately narrow so tests can swap in fakes.

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::StationCatalog;
use crate::models::{FuelStop, GeoPoint, Polyline};

#[derive(Debug, Clone, Error)]
pub enum GeocodeError {
    #[error("no match found for place '{0}'")]
    NotFound(String),
    #[error("geocoding provider failure: {0}")]
    Provider(String),
}

#[derive(Debug, Clone, Error)]
pub enum DirectionsError {
    #[error("no route between the given points")]
    NoRoute,
    #[error("directions provider failure: {0}")]
    Provider(String),
}

#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("station catalog unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("map rendering failed: {0}")]
    Render(String),
}

/// Resolves a free-form place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, place: &str) -> Result<GeoPoint, GeocodeError>;
}

/// Computes a drivable path between two coordinates.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn directions(&self, start: GeoPoint, end: GeoPoint)
        -> Result<Polyline, DirectionsError>;
}

/// Produces a point-in-time snapshot of the station price catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_stations(&self) -> Result<StationCatalog, CatalogError>;
}

/// Renders a visual artifact for a computed plan and returns a reference to
/// it. Purely presentational; the numeric plan never depends on it.
pub trait MapRenderer: Send + Sync {
    fn render(&self, polyline: &Polyline, stops: &[FuelStop]) -> Result<String, RenderError>;
}
