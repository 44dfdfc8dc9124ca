//! Read-only geometry consumed by the rendering core.

use super::GeoPoint;

/// A geographic feature. Polygon rings are exterior first, holes after.
#[derive(Clone, Debug, PartialEq)]
pub enum GeoFeature {
    Point(GeoPoint),
    LineString(Vec<GeoPoint>),
    Polygon(Vec<Vec<GeoPoint>>),
    MultiPolygon(Vec<Vec<Vec<GeoPoint>>>),
}

impl GeoFeature {
    /// Iterate over every vertex of the feature, in storage order.
    pub fn points(&self) -> Box<dyn Iterator<Item = GeoPoint> + '_> {
        match self {
            GeoFeature::Point(p) => Box::new(std::iter::once(*p)),
            GeoFeature::LineString(line) => Box::new(line.iter().copied()),
            GeoFeature::Polygon(rings) => Box::new(rings.iter().flatten().copied()),
            GeoFeature::MultiPolygon(polygons) => {
                Box::new(polygons.iter().flatten().flatten().copied())
            }
        }
    }

    pub fn as_point(&self) -> Option<GeoPoint> {
        match self {
            GeoFeature::Point(p) => Some(*p),
            _ => None,
        }
    }
}

/// An ordered sequence of features.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<GeoFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<GeoFeature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeoFeature> {
        self.features.iter()
    }

    /// Every vertex of every feature.
    pub fn points(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.features.iter().flat_map(GeoFeature::points)
    }
}

impl From<Vec<GeoFeature>> for FeatureCollection {
    fn from(features: Vec<GeoFeature>) -> Self {
        Self { features }
    }
}

impl FromIterator<GeoFeature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = GeoFeature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a GeoFeature;
    type IntoIter = std::slice::Iter<'a, GeoFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
