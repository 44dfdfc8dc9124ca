//! Tissot indicatrix grid.
//!
//! A regular lattice of small geodesic discs. Nothing is measured: the
//! projected shape and size of each disc is what shows the distortion.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geo::{geodesic_circle_with, GeoFeature, GeoPoint};

/// Slack when counting grid steps, so 160 / 20 counts as 8 and not 7.999….
const STEP_EPS: f64 = 1e-9;

/// Finest accepted spacing; at 0.1° the grid already holds 5.8 million discs.
pub const MIN_GRID_SPACING: f64 = 0.1;

/// Grid layout in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatrixGrid {
    /// Distance between neighbouring disc centers, in both axes.
    pub spacing: f64,
    /// Angular radius of each disc.
    pub radius: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl Default for IndicatrixGrid {
    fn default() -> Self {
        Self {
            spacing: 20.0,
            radius: 2.0,
            lat_min: -80.0,
            lat_max: 80.0,
        }
    }
}

impl IndicatrixGrid {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spacing.is_finite() && self.spacing >= MIN_GRID_SPACING && self.spacing <= 180.0) {
            return Err(ConfigError::InvalidGridSpacing(self.spacing));
        }
        if !(self.radius.is_finite() && self.radius > 0.0 && self.radius < 90.0) {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        let lat_ok = |v: f64| v.is_finite() && (-90.0..=90.0).contains(&v);
        if !(lat_ok(self.lat_min) && lat_ok(self.lat_max) && self.lat_min <= self.lat_max) {
            return Err(ConfigError::InvalidLatitudeRange(self.lat_min, self.lat_max));
        }
        Ok(())
    }

    /// Latitudes of the grid rows, `lat_min` to `lat_max` inclusive.
    fn latitudes(&self) -> impl Iterator<Item = f64> {
        let rows = ((self.lat_max - self.lat_min) / self.spacing + STEP_EPS).floor() as usize + 1;
        let (start, step) = (self.lat_min, self.spacing);
        (0..rows).map(move |i| start + i as f64 * step)
    }

    /// Longitudes of the grid columns, -180 inclusive to 180 exclusive.
    fn longitudes(&self) -> impl Iterator<Item = f64> {
        let cols = (360.0 / self.spacing - STEP_EPS).ceil() as usize;
        let step = self.spacing;
        (0..cols).map(move |j| -180.0 + j as f64 * step)
    }
}

/// One disc of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct IndicatrixSpec {
    pub center: GeoPoint,
    pub radius_deg: f64,
}

impl IndicatrixSpec {
    /// The disc as a closed ring of `segments` segments.
    pub fn to_feature(&self, segments: usize) -> GeoFeature {
        let ring = geodesic_circle_with(self.center, self.radius_deg.to_radians(), segments);
        GeoFeature::Polygon(vec![ring])
    }
}

/// Every disc of `grid`, row by row from south to north, west to east.
///
/// An invalid grid yields no discs.
pub fn indicatrix_specs(grid: &IndicatrixGrid) -> Vec<IndicatrixSpec> {
    if grid.validate().is_err() {
        return Vec::new();
    }
    grid.latitudes()
        .flat_map(|lat| {
            grid.longitudes().map(move |lon| IndicatrixSpec {
                center: GeoPoint::new(lon, lat),
                radius_deg: grid.radius,
            })
        })
        .collect()
}

pub fn indicatrix_features(grid: &IndicatrixGrid, circle_segments: usize) -> Vec<GeoFeature> {
    indicatrix_specs(grid)
        .iter()
        .map(|spec| spec.to_feature(circle_segments))
        .collect()
}
