//! Helpers shared by the projection families.

use std::f64::consts::FRAC_PI_2;

/// Slack allowed past the poles for latitudes that went through a degree
/// round trip (90f64.to_radians() is not exactly π/2).
const POLE_SLACK: f64 = 1e-12;

/// Whether (lon, lat) in radians lies on the sphere: both finite and
/// |lat| ≤ π/2. Longitude is not range-checked; values past ±π are kept
/// as-is so rings straddling the antimeridian stay contiguous.
pub fn in_domain(lon: f64, lat: f64) -> bool {
    lon.is_finite() && lat.is_finite() && lat.abs() <= FRAC_PI_2 + POLE_SLACK
}

/// Clamp a latitude known to be in the domain to exactly [-π/2, π/2].
pub fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-FRAC_PI_2, FRAC_PI_2)
}

/// Keep a planar result only when both ordinates are finite.
pub fn finite_pair(x: f64, y: f64) -> Option<(f64, f64)> {
    (x.is_finite() && y.is_finite()).then_some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_domain() {
        assert!(in_domain(0.0, 0.0));
        assert!(in_domain(3.5, 90f64.to_radians()));
        assert!(in_domain(-3.5, -90f64.to_radians()));
        assert!(!in_domain(0.0, 1.6));
        assert!(!in_domain(f64::NAN, 0.0));
        assert!(!in_domain(0.0, f64::NEG_INFINITY));
    }

    #[test]
    fn test_finite_pair() {
        assert_eq!(finite_pair(1.0, 2.0), Some((1.0, 2.0)));
        assert_eq!(finite_pair(f64::INFINITY, 2.0), None);
        assert_eq!(finite_pair(1.0, f64::NAN), None);
    }
}
