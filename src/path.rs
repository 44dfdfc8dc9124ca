//! Features to drawing commands.
//!
//! Vertices whose projection is undefined are dropped and the sub-path is
//! drawn through the remaining ones. This is lossy, not a geometric clip:
//! a ring that crosses the antimeridian is drawn straight across the map.

use std::fmt::{self, Write as _};

use serde::{Serialize, Serializer};

use crate::geo::{GeoFeature, GeoPoint};
use crate::proj::FittedProjection;

/// Fewest valid vertices kept for a polygon ring.
const MIN_RING_VERTICES: usize = 3;
/// Fewest valid vertices kept for a line.
const MIN_LINE_VERTICES: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    ClosePath,
}

/// An ordered sequence of drawing commands in viewport coordinates.
///
/// `Display` renders it as an SVG path string (`M x,y L x,y Z`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    commands: Vec<DrawCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every vertex, in command order.
    pub fn vertices(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::MoveTo(x, y) | DrawCommand::LineTo(x, y) => Some((x, y)),
            DrawCommand::ClosePath => None,
        })
    }

    fn push_subpath(&mut self, points: &[(f64, f64)], closed: bool) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        self.commands.push(DrawCommand::MoveTo(x0, y0));
        self.commands
            .extend(rest.iter().map(|&(x, y)| DrawCommand::LineTo(x, y)));
        if closed {
            self.commands.push(DrawCommand::ClosePath);
        }
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 && !matches!(command, DrawCommand::ClosePath) {
                f.write_char(' ')?;
            }
            match command {
                DrawCommand::MoveTo(x, y) => write!(f, "M{x:.3},{y:.3}")?,
                DrawCommand::LineTo(x, y) => write!(f, "L{x:.3},{y:.3}")?,
                DrawCommand::ClosePath => f.write_char('Z')?,
            }
        }
        Ok(())
    }
}

impl Serialize for PathData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Project a run of vertices, keeping only the defined ones.
fn project_run(points: &[GeoPoint], projection: &FittedProjection) -> Vec<(f64, f64)> {
    points.iter().filter_map(|&p| projection.project(p)).collect()
}

fn push_ring(path: &mut PathData, ring: &[GeoPoint], projection: &FittedProjection) {
    let mut projected = project_run(ring, projection);
    // The closing vertex is implied by ClosePath.
    if projected.len() > 1 && projected.first() == projected.last() {
        projected.pop();
    }
    if projected.len() >= MIN_RING_VERTICES {
        path.push_subpath(&projected, true);
    }
}

/// Drawing commands for `feature`, or `None` if nothing is drawable.
///
/// Points produce no path; they are drawn as markers by the callers.
pub fn generate_path(feature: &GeoFeature, projection: &FittedProjection) -> Option<PathData> {
    let mut path = PathData::new();
    match feature {
        GeoFeature::Point(_) => {}
        GeoFeature::LineString(line) => {
            let projected = project_run(line, projection);
            if projected.len() >= MIN_LINE_VERTICES {
                path.push_subpath(&projected, false);
            }
        }
        GeoFeature::Polygon(rings) => {
            for ring in rings {
                push_ring(&mut path, ring, projection);
            }
        }
        GeoFeature::MultiPolygon(polygons) => {
            for ring in polygons.iter().flatten() {
                push_ring(&mut path, ring, projection);
            }
        }
    }
    (!path.is_empty()).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Viewport;
    use crate::geo::FeatureCollection;
    use crate::proj::ProjectionKind;
    use approx::assert_relative_eq;

    fn fitted(kind: ProjectionKind) -> FittedProjection {
        let reference = FeatureCollection::new(vec![GeoFeature::LineString(vec![
            GeoPoint::new(-180.0, -90.0),
            GeoPoint::new(180.0, 90.0),
        ])]);
        FittedProjection::fit(kind, Viewport::new(900.0, 600.0).unwrap(), &reference)
    }

    fn square(lon: f64, lat: f64, size: f64) -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(lon, lat),
            GeoPoint::new(lon + size, lat),
            GeoPoint::new(lon + size, lat + size),
            GeoPoint::new(lon, lat + size),
            GeoPoint::new(lon, lat),
        ]
    }

    #[test]
    fn test_polygon_closed_subpaths() {
        let proj = fitted(ProjectionKind::Equirectangular);
        let feature = GeoFeature::Polygon(vec![square(0.0, 0.0, 10.0), square(2.0, 2.0, 1.0)]);
        let path = generate_path(&feature, &proj).unwrap();

        let commands = path.commands();
        assert_eq!(commands.len(), 10);
        assert!(matches!(commands[0], DrawCommand::MoveTo(..)));
        assert_eq!(commands[4], DrawCommand::ClosePath);
        assert!(matches!(commands[5], DrawCommand::MoveTo(..)));
        assert_eq!(commands[9], DrawCommand::ClosePath);
    }

    #[test]
    fn test_multipolygon_rings() {
        let proj = fitted(ProjectionKind::EqualEarth);
        let feature = GeoFeature::MultiPolygon(vec![
            vec![square(0.0, 0.0, 5.0)],
            vec![square(40.0, 10.0, 5.0), square(41.0, 11.0, 1.0)],
        ]);
        let path = generate_path(&feature, &proj).unwrap();
        let closes = path
            .commands()
            .iter()
            .filter(|c| **c == DrawCommand::ClosePath)
            .count();
        assert_eq!(closes, 3);
    }

    #[test]
    fn test_linestring_open() {
        let proj = fitted(ProjectionKind::Mercator);
        let feature = GeoFeature::LineString(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 10.0)]);
        let path = generate_path(&feature, &proj).unwrap();
        assert_eq!(path.commands().len(), 2);
        assert!(!path.commands().contains(&DrawCommand::ClosePath));

        let (u, v) = proj.project(GeoPoint::new(0.0, 0.0)).unwrap();
        assert_eq!(path.vertices().next(), Some((u, v)));
    }

    #[test]
    fn test_point_has_no_path() {
        let proj = fitted(ProjectionKind::Mercator);
        assert!(generate_path(&GeoFeature::Point(GeoPoint::new(1.0, 1.0)), &proj).is_none());
    }

    #[test]
    fn test_undefined_vertices_dropped() {
        let proj = fitted(ProjectionKind::Equirectangular);
        let feature = GeoFeature::LineString(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(5.0, f64::NAN),
            GeoPoint::new(10.0, 0.0),
            GeoPoint::new(15.0, 120.0),
        ]);
        let path = generate_path(&feature, &proj).unwrap();
        assert_eq!(path.vertices().count(), 2);
    }

    #[test]
    fn test_all_undefined_is_empty() {
        let proj = fitted(ProjectionKind::Mercator);
        let feature = GeoFeature::Polygon(vec![vec![
            GeoPoint::new(f64::NAN, 0.0),
            GeoPoint::new(0.0, 100.0),
            GeoPoint::new(0.0, f64::INFINITY),
        ]]);
        assert!(generate_path(&feature, &proj).is_none());
    }

    #[test]
    fn test_zero_length_features_omitted() {
        let proj = fitted(ProjectionKind::Mercator);
        assert!(generate_path(&GeoFeature::LineString(vec![]), &proj).is_none());
        assert!(generate_path(&GeoFeature::LineString(vec![GeoPoint::new(1.0, 1.0)]), &proj).is_none());
        assert!(generate_path(&GeoFeature::Polygon(vec![vec![]]), &proj).is_none());
        // Two distinct vertices plus closure is not a ring
        let sliver = GeoFeature::Polygon(vec![vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.0, 0.0),
        ]]);
        assert!(generate_path(&sliver, &proj).is_none());
    }

    #[test]
    fn test_svg_string() {
        let proj = fitted(ProjectionKind::Equirectangular);
        let feature = GeoFeature::Polygon(vec![square(0.0, 0.0, 90.0)]);
        let path = generate_path(&feature, &proj).unwrap();
        let d = path.to_string();
        assert!(d.starts_with("M450.000,300.000 L"), "{d}");
        assert!(d.ends_with('Z'));
        assert_eq!(d.matches('M').count(), 1);
        assert_eq!(d.matches('L').count(), 3);

        let (x, y) = path.vertices().nth(1).unwrap();
        assert_relative_eq!(x, 675.0, epsilon = 1e-9);
        assert_relative_eq!(y, 300.0, epsilon = 1e-9);
    }
}
