//! Equirectangular (Plate Carrée) projection on the unit sphere.
//!
//! forward: x = λ, y = φ
//! inverse: λ = x, φ = y
//!
//! The baseline: longitude and latitude are scaled linearly, so any shape
//! change in an indicatrix comes from the other families.

use std::f64::consts::FRAC_PI_2;

use crate::proj::common::{clamp_lat, finite_pair, in_domain};
use crate::proj::{Projection, ProjectionKind};

#[derive(Clone, Copy, Debug, Default)]
pub struct Equirectangular;

impl Projection for Equirectangular {
    fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !in_domain(lon, lat) {
            return None;
        }
        Some((lon, clamp_lat(lat)))
    }

    fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if y.abs() > FRAC_PI_2 {
            return None;
        }
        finite_pair(x, y)
    }

    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Equirectangular
    }
}
