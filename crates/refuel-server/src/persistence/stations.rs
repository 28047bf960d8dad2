//! Station catalog persistence operations.

use anyhow::Result;
use async_trait::async_trait;
use refuel_core::providers::{CatalogError, CatalogSource};
use refuel_core::{GeoPoint, StationCatalog, StationRecord};
use sqlx::SqlitePool;

use super::db::Database;

/// Upsert a station row, refreshing the import timestamp.
pub async fn upsert_station(pool: &SqlitePool, record: &StationRecord) -> Result<()> {
    let (lat, lon) = match record.location {
        Some(point) => (Some(point.lat), Some(point.lon)),
        None => (None, None),
    };

    sqlx::query(
        r#"
        INSERT INTO stations (opis_id, truckstop_name, address, city, state, rack_id, retail_price, lat, lon, imported_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, CURRENT_TIMESTAMP)
        ON CONFLICT(opis_id, rack_id) DO UPDATE SET
            truckstop_name = ?2, address = ?3, city = ?4, state = ?5,
            retail_price = ?7, lat = ?8, lon = ?9,
            imported_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(&record.opis_id)
    .bind(&record.truckstop_name)
    .bind(&record.address)
    .bind(&record.city)
    .bind(&record.state)
    .bind(&record.rack_id)
    .bind(record.retail_price)
    .bind(lat)
    .bind(lon)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load every station row from the database.
pub async fn load_all_stations(pool: &SqlitePool) -> Result<Vec<StationRecord>> {
    let rows = sqlx::query_as::<_, StationRow>(
        "SELECT opis_id, truckstop_name, address, city, state, rack_id, retail_price, lat, lon FROM stations",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(StationRecord::from).collect())
}

/// Number of stations currently in the catalog.
pub async fn count_stations(pool: &SqlitePool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM stations")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct StationRow {
    opis_id: String,
    truckstop_name: String,
    address: String,
    city: String,
    state: String,
    rack_id: String,
    retail_price: f64,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl From<StationRow> for StationRecord {
    fn from(row: StationRow) -> Self {
        let location = match (row.lat, row.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        };

        StationRecord {
            opis_id: row.opis_id,
            truckstop_name: row.truckstop_name,
            address: row.address,
            city: row.city,
            state: row.state,
            rack_id: row.rack_id,
            retail_price: row.retail_price,
            location,
        }
    }
}

/// `CatalogSource` backed by the SQLite station table.
///
/// Every call reads a fresh point-in-time snapshot, so concurrent planning
/// runs never observe a half-updated catalog.
#[derive(Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    pub fn new(database: &Database) -> Self {
        Self {
            pool: database.pool().clone(),
        }
    }
}

#[async_trait]
impl CatalogSource for SqliteCatalog {
    async fn load_stations(&self) -> Result<StationCatalog, CatalogError> {
        let stations = load_all_stations(&self.pool)
            .await
            .map_err(|err| CatalogError::Unavailable(err.to_string()))?;
        Ok(StationCatalog::new(stations))
    }
}
