//! Persistence layer for the refuel server.
//!
//! Provides SQLite-backed storage for the fuel station price catalog. The
//! planner itself never touches the database; it receives an owned snapshot
//! through the `CatalogSource` trait.

pub mod db;
pub mod stations;

pub use db::{init_database, Database};
pub use stations::{count_stations, load_all_stations, upsert_station, SqliteCatalog};
