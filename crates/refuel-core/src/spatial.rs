//! Great-circle and geodesic distance math.
//!
//! Two distance functions serve two purposes: the ellipsoidal geodesic is
//! used for route-segment lengths, where error accumulates over a long
//! drive, and the cheaper spherical haversine is used for nearest-station
//! search, where sub-meter precision buys nothing.

use crate::models::GeoPoint;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;
/// Kilometers to statute miles.
const MILES_PER_KM: f64 = 0.621371;

/// WGS-84 semi-major axis in meters.
const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;
const METERS_PER_MILE: f64 = 1_609.344;

const VINCENTY_MAX_ITERATIONS: usize = 100;
const VINCENTY_CONVERGENCE: f64 = 1e-12;

/// Great-circle distance between two points in miles (haversine formula).
pub fn haversine_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lon - a.lon).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c * MILES_PER_KM
}

/// Ellipsoidal distance between two points in miles, via Vincenty's inverse
/// formula on WGS-84.
///
/// Falls back to haversine for the near-antipodal pairs where the iteration
/// does not converge.
pub fn geodesic_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let big_l = (b.lon - a.lon).to_radians();
    let u1 = ((1.0 - WGS84_F) * a.lat.to_radians().tan()).atan();
    let u2 = ((1.0 - WGS84_F) * b.lat.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = big_l;
    let mut sin_sigma = 0.0;
    let mut cos_sigma = 0.0;
    let mut sigma = 0.0;
    let mut cos_sq_alpha = 0.0;
    let mut cos_2sigma_m = 0.0;
    let mut converged = false;

    for _ in 0..VINCENTY_MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            // Coincident points.
            return 0.0;
        }
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        cos_2sigma_m = if cos_sq_alpha == 0.0 {
            // Equatorial line.
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };
        let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
        let lambda_prev = lambda;
        lambda = big_l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));
        if (lambda - lambda_prev).abs() < VINCENTY_CONVERGENCE {
            converged = true;
            break;
        }
    }

    if !converged {
        return haversine_miles(a, b);
    }

    let b_axis = WGS84_A * (1.0 - WGS84_F);
    let u_sq = cos_sq_alpha * (WGS84_A.powi(2) - b_axis.powi(2)) / b_axis.powi(2);
    let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = big_b
        * sin_sigma
        * (cos_2sigma_m
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                    - big_b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma.powi(2))
                        * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

    let meters = b_axis * big_a * (sigma - delta_sigma);
    meters / METERS_PER_MILE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_same_point_is_zero() {
        let p = GeoPoint::new(36.1, -115.1);
        assert!(haversine_miles(p, p) < 0.001);
    }

    #[test]
    fn haversine_known_distance() {
        // Las Vegas to Los Angeles, ~230 miles great-circle.
        let lv = GeoPoint::new(36.17, -115.14);
        let la = GeoPoint::new(34.05, -118.24);
        let miles = haversine_miles(lv, la);
        assert!(
            (220.0..245.0).contains(&miles),
            "LV to LA should be ~230mi, got {miles}"
        );
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = GeoPoint::new(40.0, -100.0);
        let b = GeoPoint::new(41.5, -98.25);
        assert!((haversine_miles(a, b) - haversine_miles(b, a)).abs() < 1e-9);
    }

    #[test]
    fn geodesic_same_point_is_zero() {
        let p = GeoPoint::new(33.6846, -117.8265);
        assert_eq!(geodesic_miles(p, p), 0.0);
    }

    #[test]
    fn geodesic_one_degree_latitude() {
        // One degree of latitude at the equator is ~110.57 km on WGS-84.
        let miles = geodesic_miles(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!(
            (68.5..69.0).contains(&miles),
            "1 deg equatorial latitude should be ~68.7mi, got {miles}"
        );
    }

    #[test]
    fn geodesic_is_symmetric() {
        let a = GeoPoint::new(36.17, -115.14);
        let b = GeoPoint::new(34.05, -118.24);
        assert!((geodesic_miles(a, b) - geodesic_miles(b, a)).abs() < 1e-6);
    }

    #[test]
    fn geodesic_close_to_haversine_over_short_segments() {
        let a = GeoPoint::new(40.0, -100.0);
        let b = GeoPoint::new(40.05, -100.05);
        let geo = geodesic_miles(a, b);
        let hav = haversine_miles(a, b);
        // The two models disagree by well under 1% at this scale.
        assert!((geo - hav).abs() / hav < 0.01, "geo {geo} vs hav {hav}");
    }
}
