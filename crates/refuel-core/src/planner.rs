//! Route walking and refuel planning.
//!
//! A single forward pass over the polyline: distance accumulates segment by
//! segment, and once the distance since the last refuel reaches the range
//! threshold, a stop is placed at the nearest catalog station. The pass
//! never backtracks and never revisits a decision, so a plan is
//! deterministic for a given polyline and catalog snapshot.

use serde::{Deserialize, Serialize};

use crate::catalog::StationCatalog;
use crate::error::PlanError;
use crate::models::{FuelStop, Polyline, RoutePlan, StopKind};
use crate::spatial::geodesic_miles;

/// Tunable constants for the refuel planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Maximum miles travelable before a refuel decision is forced.
    pub range_miles: f64,
    /// Maximum distance within which a station is considered reachable from
    /// a trigger point.
    pub search_radius_miles: f64,
    /// Assumed constant fuel consumption rate.
    pub miles_per_gallon: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            range_miles: 500.0,
            search_radius_miles: 50.0,
            miles_per_gallon: 10.0,
        }
    }
}

impl PlannerConfig {
    fn validate(&self) -> Result<(), PlanError> {
        if !(self.range_miles > 0.0) {
            return Err(PlanError::InvalidConfig(format!(
                "range_miles must be positive, got {}",
                self.range_miles
            )));
        }
        if !(self.search_radius_miles > 0.0) {
            return Err(PlanError::InvalidConfig(format!(
                "search_radius_miles must be positive, got {}",
                self.search_radius_miles
            )));
        }
        if !(self.miles_per_gallon > 0.0) {
            return Err(PlanError::InvalidConfig(format!(
                "miles_per_gallon must be positive, got {}",
                self.miles_per_gallon
            )));
        }
        Ok(())
    }
}

/// Walks the route and computes a cost-consistent refuel plan.
///
/// At each polyline vertex where the distance since the last refuel has
/// reached `range_miles`, the nearest station within `search_radius_miles`
/// is charged for the whole segment since that last refuel. A trigger with
/// no station in range is not dropped: the check re-fires at every following
/// vertex until a station is found. After the walk, the remaining partial
/// segment to the destination is closed out at the last known price, or
/// reported unpriced when no stop was ever made.
pub fn plan_route(
    polyline: &Polyline,
    catalog: &StationCatalog,
    config: &PlannerConfig,
) -> Result<RoutePlan, PlanError> {
    config.validate()?;
    let points = polyline.points();
    if points.len() < 2 {
        return Err(PlanError::DegeneratePolyline(points.len()));
    }

    let mut cumulative = 0.0;
    let mut last_refuel_mark = 0.0;
    let mut last_price: Option<f64> = None;
    let mut stops: Vec<FuelStop> = Vec::new();

    for pair in points.windows(2) {
        cumulative += geodesic_miles(pair[0], pair[1]);
        if cumulative - last_refuel_mark < config.range_miles {
            continue;
        }

        let Some(found) = catalog.nearest(pair[1], config.search_radius_miles)? else {
            // No station reachable from this vertex; the trigger re-fires at
            // the next one with the same baseline.
            continue;
        };

        let segment_miles = cumulative - last_refuel_mark;
        let gallons = segment_miles / config.miles_per_gallon;
        let price = found.station.retail_price;
        stops.push(FuelStop {
            location: found.location,
            stop_mile: round2(cumulative),
            price_per_gallon: Some(round3(price)),
            segment_miles: round2(segment_miles),
            gallons: round2(gallons),
            cost: round2(gallons * price),
            kind: StopKind::Refuel,
        });
        last_refuel_mark = cumulative;
        last_price = Some(price);
    }

    let final_segment = cumulative - last_refuel_mark;
    if final_segment > 0.0 {
        let destination = points[points.len() - 1];
        let gallons = final_segment / config.miles_per_gallon;
        let (price_per_gallon, cost) = match last_price {
            Some(price) => (Some(round3(price)), round2(gallons * price)),
            // No price was ever established on this route; the remainder is
            // reported unpriced rather than folded into the total.
            None => (None, 0.0),
        };
        stops.push(FuelStop {
            location: destination,
            stop_mile: round2(cumulative),
            price_per_gallon,
            segment_miles: round2(final_segment),
            gallons: round2(gallons),
            cost,
            kind: StopKind::FinalLeg,
        });
    }

    let total_cost: f64 = stops.iter().map(|stop| stop.cost).sum();
    Ok(RoutePlan {
        total_miles: round2(cumulative),
        total_cost: round2(total_cost),
        stops,
        map_url: None,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, StationRecord};

    const LON: f64 = -100.0;
    /// Roughly 100 miles of latitude.
    const STEP_DEG: f64 = 1.46;

    fn station(opis_id: &str, price: f64, location: GeoPoint) -> StationRecord {
        StationRecord {
            opis_id: opis_id.to_string(),
            truckstop_name: format!("Truckstop {opis_id}"),
            address: "100 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "MO".to_string(),
            rack_id: "1".to_string(),
            retail_price: price,
            location: Some(location),
        }
    }

    /// A northbound polyline with `segments` vertices spaced ~100 miles.
    fn northbound(segments: usize) -> Polyline {
        let points = (0..=segments)
            .map(|k| GeoPoint::new(40.0 + k as f64 * STEP_DEG, LON))
            .collect();
        Polyline::new(points)
    }

    fn vertex(k: usize) -> GeoPoint {
        GeoPoint::new(40.0 + k as f64 * STEP_DEG, LON)
    }

    #[test]
    fn rejects_degenerate_polyline() {
        let catalog = StationCatalog::default();
        let config = PlannerConfig::default();
        let one_point = Polyline::new(vec![GeoPoint::new(40.0, LON)]);
        assert_eq!(
            plan_route(&one_point, &catalog, &config).unwrap_err(),
            PlanError::DegeneratePolyline(1)
        );
        let empty = Polyline::new(Vec::new());
        assert_eq!(
            plan_route(&empty, &catalog, &config).unwrap_err(),
            PlanError::DegeneratePolyline(0)
        );
    }

    #[test]
    fn rejects_invalid_config() {
        let catalog = StationCatalog::default();
        let polyline = northbound(2);
        let config = PlannerConfig {
            search_radius_miles: 0.0,
            ..PlannerConfig::default()
        };
        assert!(matches!(
            plan_route(&polyline, &catalog, &config),
            Err(PlanError::InvalidConfig(_))
        ));
    }

    #[test]
    fn total_miles_equals_sum_of_pairwise_distances() {
        let polyline = northbound(12);
        let expected: f64 = polyline
            .points()
            .windows(2)
            .map(|pair| geodesic_miles(pair[0], pair[1]))
            .sum();
        let plan = plan_route(&polyline, &StationCatalog::default(), &PlannerConfig::default())
            .unwrap();
        assert!((plan.total_miles - expected).abs() < 0.01);
    }

    // Scenario: two points 10 miles apart, one station near the midpoint.
    // Too short to trigger a refuel, so the remainder has no established
    // price and carries zero cost.
    #[test]
    fn short_route_yields_unpriced_remainder() {
        let start = GeoPoint::new(36.0, -115.0);
        let end = GeoPoint::new(36.0 + 10.0 / 69.0, -115.0);
        let midpoint = GeoPoint::new(36.0 + 5.0 / 69.0, -115.03);
        let catalog = StationCatalog::new(vec![station("mid", 3.50, midpoint)]);
        let polyline = Polyline::new(vec![start, end]);

        let plan = plan_route(&polyline, &catalog, &PlannerConfig::default()).unwrap();

        assert_eq!(plan.stops.len(), 1);
        let remainder = &plan.stops[0];
        assert_eq!(remainder.kind, StopKind::FinalLeg);
        assert_eq!(remainder.price_per_gallon, None);
        assert_eq!(remainder.cost, 0.0);
        assert!(remainder.segment_miles > 9.0 && remainder.segment_miles < 11.0);
        assert_eq!(plan.total_cost, 0.0);
        assert!(plan.total_miles > 9.0 && plan.total_miles < 11.0);
    }

    // Scenario: a ~1200-mile line with stations near miles 500 and 1000.
    #[test]
    fn long_route_stops_twice_and_closes_the_final_leg() {
        let polyline = northbound(12);
        let catalog = StationCatalog::new(vec![
            station("first", 3.00, vertex(5)),
            station("second", 3.20, vertex(10)),
        ]);

        let plan = plan_route(&polyline, &catalog, &PlannerConfig::default()).unwrap();

        assert_eq!(plan.stops.len(), 3);

        let first = &plan.stops[0];
        assert_eq!(first.kind, StopKind::Refuel);
        assert_eq!(first.price_per_gallon, Some(3.00));
        assert!(first.segment_miles > 495.0 && first.segment_miles < 510.0);
        assert!((first.cost - first.segment_miles * 3.00 / 10.0).abs() < 0.02);

        let second = &plan.stops[1];
        assert_eq!(second.kind, StopKind::Refuel);
        assert_eq!(second.price_per_gallon, Some(3.20));
        assert!(second.segment_miles > 495.0 && second.segment_miles < 510.0);
        assert!((second.cost - second.segment_miles * 3.20 / 10.0).abs() < 0.02);

        let last = &plan.stops[2];
        assert_eq!(last.kind, StopKind::FinalLeg);
        assert_eq!(last.price_per_gallon, Some(3.20));
        assert!(last.segment_miles > 195.0 && last.segment_miles < 205.0);
        assert!((last.cost - last.segment_miles * 3.20 / 10.0).abs() < 0.02);

        let cost_sum: f64 = plan.stops.iter().map(|stop| stop.cost).sum();
        assert!((plan.total_cost - cost_sum).abs() <= 0.01);
        assert!(plan.total_miles > 1190.0 && plan.total_miles < 1215.0);
        assert!(plan.total_cost > 370.0 && plan.total_cost < 380.0);
    }

    // Scenario: no station anywhere along the route.
    #[test]
    fn no_station_in_range_emits_no_refuel_stops() {
        let polyline = northbound(12);
        let plan = plan_route(&polyline, &StationCatalog::default(), &PlannerConfig::default())
            .unwrap();

        let refuels = plan
            .stops
            .iter()
            .filter(|stop| stop.kind == StopKind::Refuel)
            .count();
        assert_eq!(refuels, 0);
        // The whole route is one unpriced remainder.
        assert_eq!(plan.stops.len(), 1);
        assert_eq!(plan.stops[0].price_per_gallon, None);
        assert_eq!(plan.total_cost, 0.0);
    }

    // The trigger keeps firing past the threshold until a station appears;
    // the missed-trigger miles all land in one segment.
    #[test]
    fn trigger_retries_without_resetting_the_baseline() {
        let polyline = northbound(12);
        // Nothing near mile 500; the first reachable station sits near
        // mile 1100.
        let catalog = StationCatalog::new(vec![station("late", 3.10, vertex(11))]);

        let plan = plan_route(&polyline, &catalog, &PlannerConfig::default()).unwrap();

        assert_eq!(plan.stops.len(), 2);
        let stop = &plan.stops[0];
        assert_eq!(stop.kind, StopKind::Refuel);
        assert!(
            stop.segment_miles > 1090.0 && stop.segment_miles < 1120.0,
            "accumulated segment should cover all missed triggers, got {}",
            stop.segment_miles
        );
        assert_eq!(plan.stops[1].kind, StopKind::FinalLeg);
        assert!(plan.stops[1].segment_miles > 95.0 && plan.stops[1].segment_miles < 105.0);
    }

    #[test]
    fn trigger_exactly_at_route_end_leaves_no_final_leg() {
        // Station at the last vertex of a route just over one threshold.
        let polyline = northbound(8);
        let catalog = StationCatalog::new(vec![station("end", 3.00, vertex(8))]);
        let config = PlannerConfig {
            range_miles: 780.0,
            ..PlannerConfig::default()
        };

        let plan = plan_route(&polyline, &catalog, &config).unwrap();

        assert_eq!(plan.stops.len(), 1);
        assert_eq!(plan.stops[0].kind, StopKind::Refuel);
    }

    #[test]
    fn segment_cost_matches_price_formula_pre_rounding() {
        let polyline = northbound(12);
        let catalog = StationCatalog::new(vec![
            station("first", 3.479, vertex(5)),
            station("second", 2.999, vertex(10)),
        ]);

        let plan = plan_route(&polyline, &catalog, &PlannerConfig::default()).unwrap();
        for stop in plan.stops.iter().filter(|s| s.kind == StopKind::Refuel) {
            let price = stop.price_per_gallon.unwrap();
            // segment_miles * price / mpg == cost, within rounding noise.
            assert!((stop.segment_miles * price / 10.0 - stop.cost).abs() < 0.02);
            assert!((stop.segment_miles / 10.0 - stop.gallons).abs() < 0.01);
        }
    }

    #[test]
    fn planning_is_idempotent() {
        let polyline = northbound(12);
        let catalog = StationCatalog::new(vec![
            station("first", 3.00, vertex(5)),
            station("second", 3.20, vertex(10)),
        ]);
        let config = PlannerConfig::default();

        let first = plan_route(&polyline, &catalog, &config).unwrap();
        let second = plan_route(&polyline, &catalog, &config).unwrap();
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn all_emitted_segments_are_strictly_positive() {
        let polyline = northbound(12);
        let catalog = StationCatalog::new(vec![
            station("first", 3.00, vertex(5)),
            station("second", 3.20, vertex(10)),
        ]);
        let plan = plan_route(&polyline, &catalog, &PlannerConfig::default()).unwrap();
        assert!(plan.stops.iter().all(|stop| stop.segment_miles > 0.0));
    }
}
