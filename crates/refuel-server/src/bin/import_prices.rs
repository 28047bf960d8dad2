//! Loads the preprocessed OPIS fuel price CSV into the station catalog.
//!
//! The CSV is the output of the offline geocoding pass, so most rows carry
//! lat/lon already; rows that still fail to parse are skipped with a warning
//! rather than aborting the import.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::{info, warn};

use refuel_core::{GeoPoint, StationRecord};
use refuel_server::config::Config;
use refuel_server::persistence;

#[derive(Debug, Parser)]
#[command(name = "import-prices", about = "Load fuel station prices into the catalog database")]
struct Args {
    /// Path to the preprocessed fuel price CSV.
    #[arg(long, default_value = "data/fuel-prices-preprocessed.csv")]
    csv: String,
    /// SQLite database path; defaults to the server's configured path.
    #[arg(long)]
    database: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct PriceRow {
    #[serde(rename = "OPIS Truckstop ID")]
    opis_id: String,
    #[serde(rename = "Truckstop Name")]
    truckstop_name: String,
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Rack ID")]
    rack_id: String,
    #[serde(rename = "Retail Price")]
    retail_price: f64,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl From<PriceRow> for StationRecord {
    fn from(row: PriceRow) -> Self {
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

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let database_path = args
        .database
        .unwrap_or_else(|| Config::from_env().database_path);

    let database = persistence::init_database(&database_path, 1).await?;

    let mut reader = csv::Reader::from_path(&args.csv)
        .with_context(|| format!("opening price CSV {}", args.csv))?;

    let mut imported = 0u64;
    let mut skipped = 0u64;
    for result in reader.deserialize::<PriceRow>() {
        let row = match result {
            Ok(row) => row,
            Err(err) => {
                warn!("Skipping unparseable row: {}", err);
                skipped += 1;
                continue;
            }
        };

        persistence::upsert_station(database.pool(), &StationRecord::from(row)).await?;
        imported += 1;
        if imported % 100 == 0 {
            info!("Imported {} stations...", imported);
        }
    }

    info!(
        "Import complete: {} stations imported, {} rows skipped",
        imported, skipped
    );
    Ok(())
}
