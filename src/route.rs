//! Great-circle flight routes.

use serde::Serialize;

use crate::geo::{slerp_geo, GeoFeature, GeoPoint};

/// Segments per route polyline (101 samples).
pub const DEFAULT_ROUTE_SEGMENTS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Airport {
    pub code: &'static str,
    pub coords: GeoPoint,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Route {
    pub label: &'static str,
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub color: &'static str,
}

pub const ICN: Airport = Airport {
    code: "ICN",
    coords: GeoPoint::new(126.4505, 37.4691),
};

pub const DXB: Airport = Airport {
    code: "DXB",
    coords: GeoPoint::new(55.3644, 25.2532),
};

pub const TUN: Airport = Airport {
    code: "TUN",
    coords: GeoPoint::new(10.2270, 36.8510),
};

pub const AIRPORTS: [Airport; 3] = [ICN, DXB, TUN];

pub const ROUTES: [Route; 2] = [
    Route {
        label: "ICN → DXB",
        start: ICN.coords,
        end: DXB.coords,
        color: "#d94d4c",
    },
    Route {
        label: "DXB → TUN",
        start: DXB.coords,
        end: TUN.coords,
        color: "#ff8c42",
    },
];

impl Route {
    /// The route as a sampled great-circle line.
    pub fn to_feature(&self, segments: usize) -> GeoFeature {
        great_circle(self.start, self.end, segments)
    }
}

/// The `segments + 1` points `slerp_geo(start, end, i / segments)` for
/// i = 0..=segments. Fewer than one segment is treated as one.
pub fn great_circle_points(start: GeoPoint, end: GeoPoint, segments: usize) -> Vec<GeoPoint> {
    let n = segments.max(1);
    (0..=n)
        .map(|i| slerp_geo(start, end, i as f64 / n as f64))
        .collect()
}

/// Sample the shortest arc from `start` to `end` as a line.
pub fn great_circle(start: GeoPoint, end: GeoPoint, segments: usize) -> GeoFeature {
    GeoFeature::LineString(great_circle_points(start, end, segments))
}
