//! Equal Earth projection (Šavrič, Patterson & Jenny, 2018).
//!
//! Pseudocylindrical and equal-area. With θ = asin(M·sin φ), M = √3/2:
//!   forward: x = λ·cos θ / (M·(A1 + 3A2θ² + θ⁶(7A3 + 9A4θ²)))
//!            y = θ·(A1 + A2θ² + θ⁶(A3 + A4θ²))
//!   inverse: θ from y by Newton iteration, then
//!            λ = M·x·(A1 + 3A2θ² + θ⁶(7A3 + 9A4θ²)) / cos θ, φ = asin(sin θ / M)

use crate::proj::common::{clamp_lat, finite_pair, in_domain};
use crate::proj::{Projection, ProjectionKind};

const A1: f64 = 1.340264;
const A2: f64 = -0.081106;
const A3: f64 = 0.000893;
const A4: f64 = 0.003796;
const M: f64 = 0.866_025_403_784_438_6; // √3 / 2

/// Projected y at the north pole.
pub const Y_MAX: f64 = 1.317_362_759_157_413_3;

const NEWTON_ITERATIONS: usize = 12;
const NEWTON_EPS: f64 = 1e-12;

#[derive(Clone, Copy, Debug, Default)]
pub struct EqualEarth;

/// y(θ) polynomial.
fn poly(theta: f64) -> f64 {
    let t2 = theta * theta;
    let t6 = t2 * t2 * t2;
    theta * (A1 + A2 * t2 + t6 * (A3 + A4 * t2))
}

/// dy/dθ.
fn poly_derivative(theta: f64) -> f64 {
    let t2 = theta * theta;
    let t6 = t2 * t2 * t2;
    A1 + 3.0 * A2 * t2 + t6 * (7.0 * A3 + 9.0 * A4 * t2)
}

impl Projection for EqualEarth {
    fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !in_domain(lon, lat) {
            return None;
        }
        let theta = (M * clamp_lat(lat).sin()).asin();
        let x = lon * theta.cos() / (M * poly_derivative(theta));
        finite_pair(x, poly(theta))
    }

    fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !x.is_finite() || y.abs() > Y_MAX + 1e-12 {
            return None;
        }

        let mut theta = y;
        for _ in 0..NEWTON_ITERATIONS {
            let delta = (poly(theta) - y) / poly_derivative(theta);
            theta -= delta;
            if delta.abs() < NEWTON_EPS {
                break;
            }
        }

        let lon = M * x * poly_derivative(theta) / theta.cos();
        let lat = (theta.sin() / M).clamp(-1.0, 1.0).asin();
        finite_pair(lon, lat)
    }

    fn kind(&self) -> ProjectionKind {
        ProjectionKind::EqualEarth
    }
}
