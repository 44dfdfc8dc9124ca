//! Spherical primitives on the unit sphere.
//!
//! Points are (longitude, latitude) in degrees. Distances and radii are
//! angles in radians. Internally everything goes through unit vectors:
//!   x = cos φ · cos λ, y = cos φ · sin λ, z = sin φ

pub mod feature;
pub mod document;

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

pub use feature::{FeatureCollection, GeoFeature};

/// Default number of segments used to sample a geodesic circle.
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 64;

/// Within this many radians of π two points are treated as antipodal.
const ANTIPODAL_EPS: f64 = 1e-7;

/// A (longitude, latitude) pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(p: GeoPoint) -> Self {
        (p.lon, p.lat)
    }
}

pub type Vec3 = [f64; 3];

/// Unit vector for a geographic point.
pub fn to_cartesian(p: GeoPoint) -> Vec3 {
    let (lon, lat) = (p.lon.to_radians(), p.lat.to_radians());
    let cos_lat = lat.cos();
    [cos_lat * lon.cos(), cos_lat * lon.sin(), lat.sin()]
}

/// Geographic point for a (not necessarily unit) vector.
pub fn from_cartesian(v: Vec3) -> GeoPoint {
    let lon = v[1].atan2(v[0]);
    let lat = v[2].atan2(v[0].hypot(v[1]));
    GeoPoint::new(lon.to_degrees(), lat.to_degrees())
}

fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

fn scale_add(a: Vec3, ka: f64, b: Vec3, kb: f64) -> Vec3 {
    [
        a[0] * ka + b[0] * kb,
        a[1] * ka + b[1] * kb,
        a[2] * ka + b[2] * kb,
    ]
}

/// Local north and east unit vectors at `p`.
///
/// Both are derived from the longitude value, so they stay defined at the
/// poles: at the north pole "north" points toward longitude `p.lon + 180°`.
fn local_frame(p: GeoPoint) -> (Vec3, Vec3) {
    let (lon, lat) = (p.lon.to_radians(), p.lat.to_radians());
    let (sin_lon, cos_lon) = lon.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let north = [-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat];
    let east = [-sin_lon, cos_lon, 0.0];
    (north, east)
}

/// Great-circle angular separation in radians.
///
/// Uses atan2(|a × b|, a · b), which stays well conditioned both for nearly
/// identical and for nearly antipodal points. Identical points give exactly 0.
pub fn angular_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let (va, vb) = (to_cartesian(a), to_cartesian(b));
    norm(cross(va, vb)).atan2(dot(va, vb))
}

/// Spherical linear interpolation along the shorter arc from `a` to `b`.
///
/// `t` is clamped to [0, 1]; `t = 0` returns `a` and `t = 1` returns `b`
/// unchanged. Antipodal endpoints have no unique shortest arc: the arc then
/// leaves `a` heading due north along the meridian of `a`.
pub fn slerp_geo(a: GeoPoint, b: GeoPoint, t: f64) -> GeoPoint {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if t == 0.0 {
        return a;
    }
    if t == 1.0 {
        return b;
    }

    let (va, vb) = (to_cartesian(a), to_cartesian(b));
    let d = norm(cross(va, vb)).atan2(dot(va, vb));

    if d < 1e-12 {
        return from_cartesian(scale_add(va, 1.0 - t, vb, t));
    }

    if PI - d < ANTIPODAL_EPS {
        let (north, _) = local_frame(a);
        let angle = t * PI;
        return from_cartesian(scale_add(va, angle.cos(), north, angle.sin()));
    }

    let sin_d = d.sin();
    let ka = ((1.0 - t) * d).sin() / sin_d;
    let kb = (t * d).sin() / sin_d;
    from_cartesian(scale_add(va, ka, vb, kb))
}

/// Closed ring of points at `angular_radius` (radians) from `center`,
/// sampled with [`DEFAULT_CIRCLE_SEGMENTS`].
pub fn geodesic_circle(center: GeoPoint, angular_radius: f64) -> Vec<GeoPoint> {
    geodesic_circle_with(center, angular_radius, DEFAULT_CIRCLE_SEGMENTS)
}

/// Closed ring of `segments + 1` points at `angular_radius` from `center`.
///
/// Points start due north of the center and run clockwise (increasing
/// bearing); the last point repeats the first. Longitudes are kept
/// contiguous with the center longitude rather than wrapped into
/// [-180, 180], so a disc centered on the antimeridian stays one piece.
pub fn geodesic_circle_with(
    center: GeoPoint,
    angular_radius: f64,
    segments: usize,
) -> Vec<GeoPoint> {
    let segments = segments.max(3);
    let up = to_cartesian(center);
    let (north, east) = local_frame(center);
    let (sin_r, cos_r) = angular_radius.sin_cos();

    let mut ring = Vec::with_capacity(segments + 1);
    for i in 0..segments {
        let bearing = 2.0 * PI * i as f64 / segments as f64;
        let (sin_b, cos_b) = bearing.sin_cos();
        let tangent = scale_add(north, cos_b, east, sin_b);
        let mut p = from_cartesian(scale_add(up, cos_r, tangent, sin_r));
        p.lon = unwrap_lon(p.lon, center.lon);
        ring.push(p);
    }
    ring.push(ring[0]);
    ring
}

/// Shift `lon` by whole turns so it lies within 180° of `reference`.
fn unwrap_lon(lon: f64, reference: f64) -> f64 {
    if !(lon.is_finite() && reference.is_finite()) {
        return lon;
    }
    reference + (lon - reference + 180.0).rem_euclid(360.0) - 180.0
}
