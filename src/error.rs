use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("Invalid grid spacing: {0}° (must be in [0.1, 180])")]
    InvalidGridSpacing(f64),

    #[error("Invalid indicatrix radius: {0}° (must be in (0, 90))")]
    InvalidRadius(f64),

    #[error("Invalid latitude range: [{0}, {1}]")]
    InvalidLatitudeRange(f64, f64),

    #[error("Invalid route sample count: {0} segments (need at least 2)")]
    InvalidSampleCount(usize),

    #[error("Invalid circle segment count: {0} (need at least 3)")]
    InvalidCircleSegments(usize),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse GeoJSON from {path}: {reason}")]
    Parse { path: String, reason: String },
}
