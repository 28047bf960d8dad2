//! Station catalog snapshot and nearest-station search.

use crate::error::PlanError;
use crate::models::{GeoPoint, StationRecord};
use crate::spatial::haversine_miles;

/// Miles per degree of latitude, mid-latitude approximation.
const MILES_PER_DEG_LAT: f64 = 69.0;
/// Miles per degree of longitude, mid-latitude approximation.
const MILES_PER_DEG_LON: f64 = 54.0;

/// A point-in-time snapshot of the known fuel stations.
///
/// Read-only for the duration of one planning run; concurrent runs may share
/// a snapshot freely.
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    stations: Vec<StationRecord>,
}

/// Result of a nearest-station query: the record, its resolved location, and
/// the haversine distance from the query point.
#[derive(Debug, Clone)]
pub struct Nearest<'a> {
    pub station: &'a StationRecord,
    pub location: GeoPoint,
    pub distance_miles: f64,
}

impl StationCatalog {
    pub fn new(stations: Vec<StationRecord>) -> Self {
        Self { stations }
    }

    pub fn stations(&self) -> &[StationRecord] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Finds the station nearest to `point` among those inside a bounding
    /// box of roughly `radius_miles` half-width.
    ///
    /// The box prefilter converts the radius to degree deltas with the fixed
    /// 69 mi/deg latitude and 54 mi/deg longitude factors; survivors are
    /// ranked by haversine distance. Ties resolve to the earliest catalog
    /// entry. Stations without a location are skipped.
    ///
    /// Returns `Ok(None)` when nothing falls inside the box; callers treat
    /// that as a normal miss, not a failure.
    pub fn nearest(
        &self,
        point: GeoPoint,
        radius_miles: f64,
    ) -> Result<Option<Nearest<'_>>, PlanError> {
        // Also rejects NaN.
        if !(radius_miles > 0.0) {
            return Err(PlanError::InvalidSearchRadius(radius_miles));
        }

        let lat_range = radius_miles / MILES_PER_DEG_LAT;
        let lon_range = radius_miles / MILES_PER_DEG_LON;

        let mut best: Option<Nearest<'_>> = None;
        for station in &self.stations {
            let Some(location) = station.location else {
                continue;
            };
            if (location.lat - point.lat).abs() > lat_range
                || (location.lon - point.lon).abs() > lon_range
            {
                continue;
            }
            let distance_miles = haversine_miles(point, location);
            let closer = match &best {
                Some(current) => distance_miles < current.distance_miles,
                None => true,
            };
            if closer {
                best = Some(Nearest {
                    station,
                    location,
                    distance_miles,
                });
            }
        }

        Ok(best)
    }
}
