//! Shared application state handed to every request handler.

use std::sync::Arc;

use refuel_core::providers::{CatalogSource, DirectionsProvider, Geocoder, MapRenderer};

/// Dependency objects for one server instance.
///
/// Every collaborator sits behind its trait so handler tests can substitute
/// fakes without any network or database.
pub struct AppState {
    pub geocoder: Arc<dyn Geocoder>,
    pub directions: Arc<dyn DirectionsProvider>,
    pub catalog: Arc<dyn CatalogSource>,
    pub renderer: Arc<dyn MapRenderer>,
}
