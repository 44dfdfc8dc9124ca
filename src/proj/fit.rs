//! Fitting a projection to a viewport.
//!
//! The reference collection is projected at unit scale, its bounding box is
//! measured, and a uniform scale plus translation is chosen so the box is
//! centered in the viewport and touches it on the binding dimension.

use crate::affine::Affine;
use crate::config::Viewport;
use crate::geo::{FeatureCollection, GeoPoint};
use crate::proj::{Projection, ProjectionKind};

/// Axis-aligned box in unit-scale plane coordinates (y growing north).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl PlaneBounds {
    fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    fn extend(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Unit-scale bounds of every projectable vertex of `points`.
pub fn plane_bounds(
    projection: &dyn Projection,
    points: impl IntoIterator<Item = GeoPoint>,
) -> PlaneBounds {
    let mut bounds = PlaneBounds::empty();
    for p in points {
        if let Some((x, y)) = projection.forward(p.lon.to_radians(), p.lat.to_radians()) {
            bounds.extend(x, y);
        }
    }
    bounds
}

/// Bounds of the whole sphere, traced along its outline in 1° steps.
fn sphere_bounds(projection: &dyn Projection) -> PlaneBounds {
    let edge = (-180..=180).flat_map(|lon| {
        let lon = lon as f64;
        [GeoPoint::new(lon, -90.0), GeoPoint::new(lon, 90.0)]
    });
    let sides = (-90..=90).flat_map(|lat| {
        let lat = lat as f64;
        [GeoPoint::new(-180.0, lat), GeoPoint::new(180.0, lat)]
    });
    plane_bounds(projection, edge.chain(sides))
}

/// A projection with scale and translation fitted to a viewport.
///
/// Immutable once built; a new family or viewport means a new fit.
pub struct FittedProjection {
    raw: Box<dyn Projection>,
    transform: Affine,
    inverse: Option<Affine>,
    viewport: Viewport,
}

impl FittedProjection {
    /// Fit `kind` so the projected extent of `reference` is centered in
    /// `viewport` without independent x/y stretch.
    ///
    /// An empty reference (nothing projectable) falls back to the extent of
    /// the whole sphere. A zero-size extent on one axis is fitted on the
    /// other; a single point is drawn at scale 1 in the center.
    pub fn fit(kind: ProjectionKind, viewport: Viewport, reference: &FeatureCollection) -> Self {
        let raw = kind.build();

        let mut bounds = plane_bounds(raw.as_ref(), reference.points());
        if bounds.is_empty() {
            log::debug!("Reference collection has no projectable vertex; fitting {kind} to the sphere");
            bounds = sphere_bounds(raw.as_ref());
        }

        let kx = if bounds.width() > 0.0 {
            viewport.width / bounds.width()
        } else {
            f64::INFINITY
        };
        let ky = if bounds.height() > 0.0 {
            viewport.height / bounds.height()
        } else {
            f64::INFINITY
        };
        let mut k = kx.min(ky);
        if !k.is_finite() {
            log::debug!("Degenerate reference extent for {kind}; using unit scale");
            k = 1.0;
        }

        let tx = (viewport.width - k * (bounds.min_x + bounds.max_x)) / 2.0;
        let ty = (viewport.height + k * (bounds.min_y + bounds.max_y)) / 2.0;
        let transform = Affine::scale_translate(k, tx, ty);

        Self {
            raw,
            inverse: transform.inverse(),
            transform,
            viewport,
        }
    }

    pub fn kind(&self) -> ProjectionKind {
        self.raw.kind()
    }

    pub fn transform(&self) -> &Affine {
        &self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Project a geographic point to viewport coordinates.
    pub fn project(&self, p: GeoPoint) -> Option<(f64, f64)> {
        let (x, y) = self.raw.forward(p.lon.to_radians(), p.lat.to_radians())?;
        let (u, v) = self.transform.forward(x, y);
        (u.is_finite() && v.is_finite()).then_some((u, v))
    }

    /// Viewport coordinates back to a geographic point.
    pub fn invert(&self, u: f64, v: f64) -> Option<GeoPoint> {
        let (x, y) = self.inverse.as_ref()?.forward(u, v);
        let (lon, lat) = self.raw.inverse(x, y)?;
        Some(GeoPoint::new(lon.to_degrees(), lat.to_degrees()))
    }
}

impl std::fmt::Debug for FittedProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FittedProjection")
            .field("kind", &self.kind())
            .field("transform", &self.transform)
            .field("viewport", &self.viewport)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoFeature;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    /// A single polygon tracing the full globe outline.
    fn globe() -> FeatureCollection {
        let mut ring = Vec::new();
        for lon in -180..=180 {
            ring.push(GeoPoint::new(lon as f64, -90.0));
        }
        for lat in -90..=90 {
            ring.push(GeoPoint::new(180.0, lat as f64));
        }
        for lon in (-180..=180).rev() {
            ring.push(GeoPoint::new(lon as f64, 90.0));
        }
        for lat in (-90..=90).rev() {
            ring.push(GeoPoint::new(-180.0, lat as f64));
        }
        FeatureCollection::new(vec![GeoFeature::Polygon(vec![ring])])
    }

    fn viewport_bounds(fitted: &FittedProjection, fc: &FeatureCollection) -> (f64, f64, f64, f64) {
        let mut b = (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in fc.points() {
            if let Some((u, v)) = fitted.project(p) {
                b = (b.0.min(u), b.1.min(v), b.2.max(u), b.3.max(v));
            }
        }
        b
    }

    #[test]
    fn test_equirectangular_full_globe_fills_width() {
        let vp = Viewport::new(900.0, 600.0).unwrap();
        let fc = globe();
        let fitted = FittedProjection::fit(ProjectionKind::Equirectangular, vp, &fc);

        // 2:1 world in a 3:2 viewport: width binds
        assert_relative_eq!(fitted.scale(), 900.0 / (2.0 * PI), epsilon = 1e-9);
        let (min_u, min_v, max_u, max_v) = viewport_bounds(&fitted, &fc);
        assert_relative_eq!(min_u, 0.0, epsilon = 1e-9);
        assert_relative_eq!(max_u, 900.0, epsilon = 1e-9);
        assert_relative_eq!(min_v, 75.0, epsilon = 1e-9);
        assert_relative_eq!(max_v, 525.0, epsilon = 1e-9);
    }

    #[test]
    fn test_height_binds_in_wide_viewport() {
        let vp = Viewport::new(2000.0, 400.0).unwrap();
        let fc = globe();
        let fitted = FittedProjection::fit(ProjectionKind::Equirectangular, vp, &fc);
        let (min_u, min_v, max_u, max_v) = viewport_bounds(&fitted, &fc);
        assert_relative_eq!(min_v, 0.0, epsilon = 1e-9);
        assert_relative_eq!(max_v, 400.0, epsilon = 1e-9);
        assert_relative_eq!(min_u, 600.0, epsilon = 1e-9);
        assert_relative_eq!(max_u, 1400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_contained_and_centered_all_families() {
        let vp = Viewport::new(900.0, 600.0).unwrap();
        let fc = globe();
        for kind in ProjectionKind::ALL {
            let fitted = FittedProjection::fit(kind, vp, &fc);
            let (min_u, min_v, max_u, max_v) = viewport_bounds(&fitted, &fc);
            assert!(min_u >= -1e-9 && max_u <= 900.0 + 1e-9, "{kind}: u in [{min_u}, {max_u}]");
            assert!(min_v >= -1e-9 && max_v <= 600.0 + 1e-9, "{kind}: v in [{min_v}, {max_v}]");
            assert_relative_eq!(min_u + max_u, 900.0, epsilon = 1e-9);
            assert_relative_eq!(min_v + max_v, 600.0, epsilon = 1e-9);
            let fills_width = (max_u - min_u - 900.0).abs() < 1e-9;
            let fills_height = (max_v - min_v - 600.0).abs() < 1e-9;
            assert!(fills_width || fills_height, "{kind} fills neither dimension");
        }
    }

    #[test]
    fn test_fit_is_idempotent() {
        let vp = Viewport::new(900.0, 600.0).unwrap();
        let fc = globe();
        for kind in ProjectionKind::ALL {
            let a = FittedProjection::fit(kind, vp, &fc);
            let b = FittedProjection::fit(kind, vp, &fc);
            assert_eq!(a.transform(), b.transform());
        }
    }

    #[test]
    fn test_viewport_change_preserves_shape() {
        let fc = globe();
        let small = FittedProjection::fit(
            ProjectionKind::EqualEarth,
            Viewport::new(900.0, 600.0).unwrap(),
            &fc,
        );
        let large = FittedProjection::fit(
            ProjectionKind::EqualEarth,
            Viewport::new(1800.0, 1200.0).unwrap(),
            &fc,
        );
        let ratio = large.scale() / small.scale();
        assert_relative_eq!(ratio, 2.0, epsilon = 1e-12);

        // Same points, same relative layout
        let a = GeoPoint::new(126.4505, 37.4691);
        let b = GeoPoint::new(10.2270, 36.8510);
        let (sa, sb) = (small.project(a).unwrap(), small.project(b).unwrap());
        let (la, lb) = (large.project(a).unwrap(), large.project(b).unwrap());
        assert_relative_eq!(lb.0 - la.0, ratio * (sb.0 - sa.0), epsilon = 1e-9);
        assert_relative_eq!(lb.1 - la.1, ratio * (sb.1 - sa.1), epsilon = 1e-9);
    }

    #[test]
    fn test_north_is_up() {
        let fitted = FittedProjection::fit(
            ProjectionKind::Mercator,
            Viewport::new(900.0, 600.0).unwrap(),
            &globe(),
        );
        let (_, v_north) = fitted.project(GeoPoint::new(0.0, 60.0)).unwrap();
        let (_, v_south) = fitted.project(GeoPoint::new(0.0, -60.0)).unwrap();
        assert!(v_north < v_south);
    }

    #[test]
    fn test_invert_roundtrip() {
        let vp = Viewport::new(900.0, 600.0).unwrap();
        let fc = globe();
        for kind in ProjectionKind::ALL {
            let fitted = FittedProjection::fit(kind, vp, &fc);
            let p = GeoPoint::new(55.3644, 25.2532);
            let (u, v) = fitted.project(p).unwrap();
            let q = fitted.invert(u, v).unwrap();
            assert_relative_eq!(q.lon, p.lon, epsilon = 1e-8);
            assert_relative_eq!(q.lat, p.lat, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_empty_reference_uses_sphere() {
        let vp = Viewport::new(900.0, 600.0).unwrap();
        let empty = FittedProjection::fit(ProjectionKind::Equirectangular, vp, &FeatureCollection::default());
        let full = FittedProjection::fit(ProjectionKind::Equirectangular, vp, &globe());
        assert_relative_eq!(empty.scale(), full.scale(), epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_reference() {
        let vp = Viewport::new(900.0, 600.0).unwrap();

        let point = FeatureCollection::new(vec![GeoFeature::Point(GeoPoint::new(10.0, 10.0))]);
        let fitted = FittedProjection::fit(ProjectionKind::Mercator, vp, &point);
        assert_relative_eq!(fitted.scale(), 1.0);
        let (u, v) = fitted.project(GeoPoint::new(10.0, 10.0)).unwrap();
        assert_relative_eq!(u, 450.0, epsilon = 1e-9);
        assert_relative_eq!(v, 300.0, epsilon = 1e-9);

        // A meridian segment has no width; height binds
        let line = FeatureCollection::new(vec![GeoFeature::LineString(vec![
            GeoPoint::new(0.0, -45.0),
            GeoPoint::new(0.0, 45.0),
        ])]);
        let fitted = FittedProjection::fit(ProjectionKind::Equirectangular, vp, &line);
        assert_relative_eq!(fitted.scale(), 600.0 / (PI / 2.0), epsilon = 1e-9);
    }
}
