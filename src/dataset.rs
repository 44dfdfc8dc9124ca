//! Point datasets: registry, loading, and projection filtering.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Viewport;
use crate::error::DatasetError;
use crate::geo::document::parse_collection;
use crate::geo::{FeatureCollection, GeoFeature};
use crate::proj::FittedProjection;

/// The selectable point datasets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetId {
    #[default]
    Airports,
    Cities,
    Earthquakes,
}

impl DatasetId {
    pub const ALL: [DatasetId; 3] = [DatasetId::Airports, DatasetId::Cities, DatasetId::Earthquakes];

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "airports" => Some(Self::Airports),
            "cities" => Some(Self::Cities),
            "earthquakes" => Some(Self::Earthquakes),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Airports => "airports",
            Self::Cities => "cities",
            Self::Earthquakes => "earthquakes",
        }
    }

    /// Document path of the dataset, relative to the asset root.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Airports => "/assets/datasets/points/point_world_A.geo.json",
            Self::Cities => "/assets/datasets/points/point_world_B.geo.json",
            Self::Earthquakes => "/assets/datasets/points/point_world_C.geo.json",
        }
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Something that can hand out dataset documents by path.
pub trait DocumentSource {
    fn fetch(&self, path: &str) -> Result<String, DatasetError>;
}

/// Reads documents from a directory on disk.
#[derive(Clone, Debug)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of `path` under the root. A leading `/` is relative to the root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl DocumentSource for FsSource {
    fn fetch(&self, path: &str) -> Result<String, DatasetError> {
        let full = self.resolve(path);
        std::fs::read_to_string(&full).map_err(|source| DatasetError::Io { path: full, source })
    }
}

/// Fetch and parse a dataset, propagating failures.
pub fn try_load_dataset(
    source: &dyn DocumentSource,
    id: DatasetId,
) -> Result<FeatureCollection, DatasetError> {
    let path = id.path();
    let text = source.fetch(path)?;
    parse_collection(&text, path)
}

/// Fetch and parse a dataset. Failures are logged and give `None`, which
/// renders as an empty dataset layer.
pub fn load_dataset(source: &dyn DocumentSource, id: DatasetId) -> Option<FeatureCollection> {
    match try_load_dataset(source, id) {
        Ok(collection) => {
            log::debug!("Loaded dataset {} ({} features)", id, collection.len());
            Some(collection)
        }
        Err(e) => {
            log::warn!("Failed to load dataset {}: {}", id, e);
            None
        }
    }
}

/// Handle for one dataset load request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    id: DatasetId,
    seq: u64,
}

impl LoadTicket {
    pub fn id(&self) -> DatasetId {
        self.id
    }
}

/// The current dataset selection and its loaded contents.
///
/// Every selection hands out a ticket; only the ticket of the latest
/// selection may fill the slot, so a slow load for an earlier selection
/// can never overwrite a newer one.
#[derive(Clone, Debug, Default)]
pub struct DatasetSlot {
    selected: Option<DatasetId>,
    seq: u64,
    data: Option<FeatureCollection>,
}

impl DatasetSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<DatasetId> {
        self.selected
    }

    pub fn data(&self) -> Option<&FeatureCollection> {
        self.data.as_ref()
    }

    /// Select `id` and clear the current contents until its load completes.
    pub fn select(&mut self, id: DatasetId) -> LoadTicket {
        self.seq += 1;
        self.selected = Some(id);
        self.data = None;
        LoadTicket { id, seq: self.seq }
    }

    /// Deliver the result of a load. Returns whether it was accepted.
    pub fn complete(&mut self, ticket: LoadTicket, result: Option<FeatureCollection>) -> bool {
        if ticket.seq != self.seq || Some(ticket.id) != self.selected {
            log::debug!(
                "Discarding stale load of {} (request {}, current {})",
                ticket.id,
                ticket.seq,
                self.seq
            );
            return false;
        }
        self.data = result;
        true
    }
}

/// A dataset point that survived filtering, with its viewport position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint<'a> {
    pub feature: &'a GeoFeature,
    pub position: (f64, f64),
}

/// Project every point feature and keep those that land finite and inside
/// the viewport's margin box, in input order. Non-point features are skipped.
pub fn filter_points<'a>(
    collection: &'a FeatureCollection,
    projection: &FittedProjection,
    viewport: Viewport,
) -> Vec<ProjectedPoint<'a>> {
    collection
        .iter()
        .filter_map(|feature| {
            let point = feature.as_point()?;
            let (x, y) = projection.project(point)?;
            let keep = x.is_finite() && y.is_finite() && viewport.within_margin(x, y);
            keep.then_some(ProjectedPoint {
                feature,
                position: (x, y),
            })
        })
        .collect()
}
