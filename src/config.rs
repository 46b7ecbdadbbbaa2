use std::path::PathBuf;

use machine_learning::{arch::LogisticRegression, dataset::BlobsSpec};
use serde::Deserialize;

use crate::{error::Result, render::RenderStyle};

pub const DEFAULT_OUTPUT: &str = "imbalanced_classification.png";

/// Every knob of the pipeline. Missing JSON fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub blobs: BlobsSpec,
    /// Padding added around the dataset's feature ranges when building the grid.
    pub margin: f64,
    /// Spacing between grid coordinates.
    pub step: f64,
    pub model: LogisticRegression,
    pub output: PathBuf,
    /// Whether to open the written image in the system viewer.
    pub show: bool,
    pub style: RenderStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blobs: BlobsSpec::default(),
            margin: 1.0,
            step: 0.1,
            model: LogisticRegression::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            show: true,
            style: RenderStyle::default(),
        }
    }
}

impl Config {
    /// Parses a `Config` from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
