pub mod affine;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod path;
pub mod proj;
pub mod render;
pub mod route;
pub mod tissot;
#[cfg(feature = "python")]
mod py;

pub use config::{RenderConfig, Viewport};
pub use error::{ConfigError, DatasetError, MapError};
pub use geo::{FeatureCollection, GeoFeature, GeoPoint};
pub use proj::{FittedProjection, ProjectionKind};
pub use render::{render, Compositor, MapState, RenderOutput, Surface, SvgSurface};

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pyo3::pymodule]
fn tissot_map(m: &pyo3::Bound<'_, pyo3::types::PyModule>) -> pyo3::PyResult<()> {
    py::register(m)?;
    Ok(())
}
