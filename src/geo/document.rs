//! GeoJSON documents to [`FeatureCollection`].

use ::geojson::{GeoJson, Geometry, Position, Value};

use super::{FeatureCollection, GeoFeature, GeoPoint};
use crate::error::DatasetError;

/// Parse a GeoJSON document into a feature collection.
///
/// Accepts a FeatureCollection, a single Feature or a bare Geometry.
/// Multi-part geometries that the core has no variant for are split:
/// a MultiPoint becomes several points, a MultiLineString several lines,
/// a GeometryCollection its members. Features without geometry and
/// positions with fewer than two ordinates are skipped.
///
/// `origin` names the document in error messages.
pub fn parse_collection(text: &str, origin: &str) -> Result<FeatureCollection, DatasetError> {
    let geojson: GeoJson = text.parse().map_err(|e: ::geojson::Error| DatasetError::Parse {
        path: origin.to_string(),
        reason: e.to_string(),
    })?;

    let mut features = Vec::new();
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(geometry) = &feature.geometry {
                    convert_geometry(geometry, &mut features);
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geometry) = &feature.geometry {
                convert_geometry(geometry, &mut features);
            }
        }
        GeoJson::Geometry(geometry) => convert_geometry(&geometry, &mut features),
    }

    Ok(FeatureCollection::new(features))
}

fn convert_geometry(geometry: &Geometry, out: &mut Vec<GeoFeature>) {
    match &geometry.value {
        Value::Point(position) => match to_point(position) {
            Some(p) => out.push(GeoFeature::Point(p)),
            None => log::debug!("Skipping point with {} ordinates", position.len()),
        },
        Value::MultiPoint(positions) => {
            out.extend(positions.iter().filter_map(|p| to_point(p)).map(GeoFeature::Point));
        }
        Value::LineString(line) => out.push(GeoFeature::LineString(to_line(line))),
        Value::MultiLineString(lines) => {
            out.extend(lines.iter().map(|line| GeoFeature::LineString(to_line(line))));
        }
        Value::Polygon(rings) => out.push(GeoFeature::Polygon(to_rings(rings))),
        Value::MultiPolygon(polygons) => {
            out.push(GeoFeature::MultiPolygon(
                polygons.iter().map(|rings| to_rings(rings)).collect(),
            ));
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                convert_geometry(g, out);
            }
        }
    }
}

fn to_point(position: &Position) -> Option<GeoPoint> {
    match position.as_slice() {
        [lon, lat, ..] => Some(GeoPoint::new(*lon, *lat)),
        _ => None,
    }
}

fn to_line(positions: &[Position]) -> Vec<GeoPoint> {
    positions.iter().filter_map(|p| to_point(p)).collect()
}

fn to_rings(rings: &[Vec<Position>]) -> Vec<Vec<GeoPoint>> {
    rings.iter().map(|ring| to_line(ring)).collect()
}
