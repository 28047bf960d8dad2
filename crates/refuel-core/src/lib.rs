//! Core logic for fuel-cost-optimized route planning.
//!
//! Pure and synchronous: given a routed polyline and a snapshot of fuel
//! station prices, `plan_route` partitions the route into range-bounded
//! segments, picks the nearest station at each refuel trigger, and totals
//! the fuel cost. All I/O lives behind the traits in [`providers`].

pub mod catalog;
pub mod error;
pub mod models;
pub mod planner;
pub mod providers;
pub mod spatial;

pub use catalog::{Nearest, StationCatalog};
pub use error::PlanError;
pub use models::{FuelStop, GeoPoint, Polyline, RoutePlan, StationRecord, StopKind};
pub use planner::{plan_route, PlannerConfig};
pub use spatial::{geodesic_miles, haversine_miles};
