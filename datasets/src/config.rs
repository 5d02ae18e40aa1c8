//! Training configurations stored as JSON
//!
//! A configuration names the data file, the fields to keep and the field to predict:
//!
//! ```json
//! {
//!     "data_file": "mushrooms.csv",
//!     "data_project_columns": ["label", "cap-shape", "odor"],
//!     "target_attribute": "label",
//!     "max_depth": 3
//! }
//! ```
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sylva::{error::Error, Dataset};

use crate::dataset::load_csv;
use crate::error::{ReadError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the CSV file, relative paths are resolved against the configuration file
    pub data_file: PathBuf,
    /// Value transformations, accepted for compatibility and ignored
    #[serde(default)]
    pub data_mappers: Vec<serde_json::Value>,
    /// Fields kept after loading, in this order. Empty keeps every field.
    #[serde(default)]
    pub data_project_columns: Vec<String>,
    /// Field predicted by the tree
    pub target_attribute: String,
    /// Optional limit on the depth of the tree
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl FromStr for Config {
    type Err = ReadError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

impl Config {
    /// Read a configuration file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ReadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut config: Config = content.parse()?;
        if config.data_file.is_relative() {
            if let Some(dir) = path.parent() {
                config.data_file = dir.join(&config.data_file);
            }
        }

        debug!("read configuration {}: {:?}", path.display(), config);

        Ok(config)
    }

    /// Load the data file and keep the configured fields
    ///
    /// Fails with an unknown field error if the target is not part of the resulting dataset.
    pub fn load_dataset(&self) -> Result<Dataset> {
        if !self.data_mappers.is_empty() {
            warn!(
                "ignoring {} data mappers, values are used as read",
                self.data_mappers.len()
            );
        }

        let dataset = load_csv(&self.data_file)?;
        let dataset = if self.data_project_columns.is_empty() {
            dataset
        } else {
            dataset.project(&self.data_project_columns)?
        };

        if !dataset.has_field(&self.target_attribute) {
            return Err(Error::UnknownField(self.target_attribute.clone()).into());
        }

        Ok(dataset)
    }
}
