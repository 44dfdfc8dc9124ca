use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::Viewport;
use crate::geo::document::parse_collection;
use crate::geo::FeatureCollection;
use crate::proj::ProjectionKind;

mod project;
mod render;
mod route;

/// Register all Python-visible functions and types.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(project::project_points, m)?)?;
    m.add_function(wrap_pyfunction!(route::great_circle, m)?)?;
    m.add_function(wrap_pyfunction!(render::render_svg, m)?)?;
    Ok(())
}

fn parse_kind(name: &str) -> PyResult<ProjectionKind> {
    ProjectionKind::from_name(name).ok_or_else(|| {
        PyValueError::new_err(format!(
            "Unknown projection: '{}'. Valid: mercator, equalEarth, equirectangular",
            name
        ))
    })
}

fn parse_viewport(width: f64, height: f64) -> PyResult<Viewport> {
    Viewport::new(width, height).map_err(|e| PyValueError::new_err(e.to_string()))
}

fn parse_document(text: &str, origin: &str) -> PyResult<FeatureCollection> {
    parse_collection(text, origin).map_err(|e| PyValueError::new_err(e.to_string()))
}
