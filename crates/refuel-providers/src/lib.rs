//! HTTP adapters for the external collaborators of the refuel planner:
//! Nominatim for geocoding and OpenRouteService for directions.

pub mod nominatim;
pub mod ors;

pub use nominatim::NominatimClient;
pub use ors::OrsClient;
