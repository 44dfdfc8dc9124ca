//! Spherical Mercator projection on the unit sphere.
//!
//!   forward: x = λ, y = ln(tan(π/4 + φ/2))
//!   inverse: λ = x, φ = 2·atan(exp(y)) - π/2
//!
//! y diverges at the poles, so latitude is clamped to ±85.0511° where the
//! projected world becomes a square (|y| = π).

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::proj::common::{finite_pair, in_domain};
use crate::proj::{Projection, ProjectionKind};

/// Maximum latitude (≈85.0511°), atan(sinh(π)) in radians.
pub const MAX_LAT: f64 = 1.4844222297453324;

#[derive(Clone, Copy, Debug, Default)]
pub struct Mercator;

impl Projection for Mercator {
    fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !in_domain(lon, lat) {
            return None;
        }
        let lat = lat.clamp(-MAX_LAT, MAX_LAT);
        finite_pair(lon, (FRAC_PI_4 + lat / 2.0).tan().ln())
    }

    fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let lat = 2.0 * y.exp().atan() - FRAC_PI_2;
        finite_pair(x, lat)
    }

    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Mercator
    }
}
