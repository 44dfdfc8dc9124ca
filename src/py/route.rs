//! PyO3 binding for great-circle sampling.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::geo::GeoPoint;
use crate::route::{great_circle_points, DEFAULT_ROUTE_SEGMENTS};

/// Sample the great circle between two (lon, lat) points.
///
/// Returns a list of `segments + 1` (lon, lat) tuples.
#[pyfunction]
#[pyo3(signature = (start, end, segments=DEFAULT_ROUTE_SEGMENTS))]
pub fn great_circle(
    start: (f64, f64),
    end: (f64, f64),
    segments: usize,
) -> PyResult<Vec<(f64, f64)>> {
    if segments < 2 {
        return Err(PyValueError::new_err(format!(
            "segments must be at least 2, got {}",
            segments
        )));
    }
    let points = great_circle_points(GeoPoint::from(start), GeoPoint::from(end), segments);
    Ok(points.into_iter().map(Into::into).collect())
}
