//! Core data models for fuel route planning.

use serde::{Deserialize, Serialize};

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A routed path as an ordered sequence of decoded coordinates.
///
/// Produced by a directions provider; consumed read-only by the planner.
/// Order is significant: it defines travel direction and cumulative distance.
/// Encoding to/from compact polyline formats happens at API boundaries, not
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<GeoPoint>,
}

impl Polyline {
    /// Creates a new polyline from decoded coordinate points.
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }
}

/// One known fuel station from the price catalog.
///
/// Immutable once loaded. A station whose address could not be geocoded has
/// `location: None` and never participates in spatial search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    pub opis_id: String,
    pub truckstop_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub rack_id: String,
    /// Retail price per gallon in USD.
    pub retail_price: f64,
    pub location: Option<GeoPoint>,
}

/// A computed refuel event along the route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelStop {
    pub location: GeoPoint,
    /// Cumulative mile mark at which this stop occurs.
    pub stop_mile: f64,
    /// Price per gallon charged for the segment ending here. `None` only on
    /// a final leg for which no price was ever established.
    pub price_per_gallon: Option<f64>,
    /// Miles covered by the segment ending at this stop.
    pub segment_miles: f64,
    pub gallons: f64,
    /// Segment fuel cost in USD.
    pub cost: f64,
    pub kind: StopKind,
}

/// Distinguishes ordinary refuel stops from the closing leg to the
/// destination, which consumes fuel but buys none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Refuel,
    FinalLeg,
}

/// The complete plan for one route: totals, ordered stops, and an optional
/// reference to the rendered map artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlan {
    pub total_miles: f64,
    #[serde(rename = "total_cost_usd")]
    pub total_cost: f64,
    #[serde(rename = "fuel_stops")]
    pub stops: Vec<FuelStop>,
    pub map_url: Option<String>,
}
