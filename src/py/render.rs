//! PyO3 binding for full map rendering.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use super::{parse_document, parse_kind, parse_viewport};
use crate::config::RenderConfig;
use crate::dataset::DatasetId;
use crate::render::{Compositor, SvgSurface};

/// Render the full map as an SVG document.
///
/// `dataset_geojson`, if given, supplies the point dataset layer; without
/// it the layer is left empty.
#[pyfunction]
#[pyo3(signature = (boundary_geojson, projection="mercator", width=900.0, height=600.0, dataset_geojson=None))]
pub fn render_svg(
    py: Python<'_>,
    boundary_geojson: &str,
    projection: &str,
    width: f64,
    height: f64,
    dataset_geojson: Option<&str>,
) -> PyResult<String> {
    let kind = parse_kind(projection)?;
    let viewport = parse_viewport(width, height)?;
    let boundary = parse_document(boundary_geojson, "boundary_geojson")?;
    let dataset = dataset_geojson
        .map(|text| parse_document(text, "dataset_geojson"))
        .transpose()?;

    let config = RenderConfig::default()
        .with_viewport(viewport)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    py.allow_threads(move || {
        let mut compositor = Compositor::new(boundary, config, kind, SvgSurface::new())
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        if let Some(data) = dataset {
            let ticket = compositor.select_dataset(DatasetId::default());
            compositor.complete_load(ticket, Some(data));
        }
        Ok(compositor.surface().to_svg())
    })
}
