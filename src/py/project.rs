//! PyO3 binding for batch point projection.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use super::{parse_document, parse_kind, parse_viewport};
use crate::geo::GeoPoint;
use crate::proj::FittedProjection;

/// Project lon/lat arrays into viewport coordinates.
///
/// The projection is fitted to `boundary_geojson` in a `width` x `height`
/// viewport, exactly as for rendering.
///
/// Args:
///     x: 1D array of longitudes in degrees.
///     y: 1D array of latitudes in degrees.
///     projection: "mercator", "equalEarth" or "equirectangular".
///     width: Viewport width.
///     height: Viewport height.
///     boundary_geojson: GeoJSON text of the reference collection.
///
/// Returns:
///     Tuple of (u, v) arrays; NaN where the point cannot be projected.
#[pyfunction]
#[pyo3(signature = (x, y, projection, width, height, boundary_geojson))]
#[allow(clippy::type_complexity)]
pub fn project_points<'py>(
    py: Python<'py>,
    x: PyReadonlyArray1<'py, f64>,
    y: PyReadonlyArray1<'py, f64>,
    projection: &str,
    width: f64,
    height: f64,
    boundary_geojson: &str,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
    let x_view = x.as_array();
    let y_view = y.as_array();

    let n = x_view.len();
    let y_len = y_view.len();
    if n != y_len {
        return Err(PyValueError::new_err(format!(
            "x and y must have same length, got {} and {}",
            n, y_len
        )));
    }

    let kind = parse_kind(projection)?;
    let viewport = parse_viewport(width, height)?;
    let boundary = parse_document(boundary_geojson, "boundary_geojson")?;

    let points: Vec<GeoPoint> = x_view
        .iter()
        .zip(y_view.iter())
        .map(|(&lon, &lat)| GeoPoint::new(lon, lat))
        .collect();

    let projected = py.allow_threads(move || {
        let fitted = FittedProjection::fit(kind, viewport, &boundary);
        points
            .into_iter()
            .map(|p| fitted.project(p).unwrap_or((f64::NAN, f64::NAN)))
            .collect::<Vec<_>>()
    });

    let (us, vs): (Vec<f64>, Vec<f64>) = projected.into_iter().unzip();

    Ok((
        PyArray1::from_owned_array(py, ndarray::Array1::from(us)),
        PyArray1::from_owned_array(py, ndarray::Array1::from(vs)),
    ))
}
