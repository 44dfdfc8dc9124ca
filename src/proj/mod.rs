pub mod common;
pub mod equal_earth;
pub mod equirectangular;
pub mod fit;
pub mod mercator;

use serde::{Deserialize, Serialize};

pub use fit::FittedProjection;

/// Trait for map projections on the unit sphere.
///
/// Both directions return `None` instead of failing: a point outside the
/// family's domain is simply not drawable, and callers omit it.
pub trait Projection: Send + Sync {
    /// Forward: (lon_rad, lat_rad) -> (x, y), y growing north.
    fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)>;

    /// Inverse: (x, y) -> (lon_rad, lat_rad).
    fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)>;

    fn kind(&self) -> ProjectionKind;
}

/// The supported projection families.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectionKind {
    #[default]
    Mercator,
    EqualEarth,
    Equirectangular,
}

impl ProjectionKind {
    pub const ALL: [ProjectionKind; 3] = [
        ProjectionKind::Mercator,
        ProjectionKind::EqualEarth,
        ProjectionKind::Equirectangular,
    ];

    /// Parse from a string name (`mercator`, `equalEarth`, `equirectangular`).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "mercator" => Some(Self::Mercator),
            "equalearth" => Some(Self::EqualEarth),
            "equirectangular" | "platecarree" => Some(Self::Equirectangular),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mercator => "mercator",
            Self::EqualEarth => "equalEarth",
            Self::Equirectangular => "equirectangular",
        }
    }

    /// Fresh unit-scale projection of this family.
    pub fn build(&self) -> Box<dyn Projection> {
        match self {
            Self::Mercator => Box::new(mercator::Mercator),
            Self::EqualEarth => Box::new(equal_earth::EqualEarth),
            Self::Equirectangular => Box::new(equirectangular::Equirectangular),
        }
    }
}

impl std::fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
