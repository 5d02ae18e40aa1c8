//! `sylva-datasets` loads categorical datasets and training configurations.
//!
//! ## The Big Picture
//!
//! `sylva-datasets` is a crate in the `sylva` workspace. It reads CSV files (optionally
//! gzipped) into [`sylva::Dataset`]s, parses the JSON configurations used to train trees on them
//! and bundles a small dataset ready to be used in tests and examples.
//!
//! ## Current State
//!
//! Currently the following datasets are provided:
//!
//! * `["tennis"]` : the play-tennis dataset of Quinlan's ID3 paper
//!
//! along with [random generators](generate) for synthetic categorical data.
//!
//! ## Using a dataset
//!
//! To use the bundled dataset in your project add the crate to your Cargo.toml with the
//! corresponding feature enabled:
//! ```ignore
//! sylva-datasets = { version = "0.1.0", features = ["tennis"] }
//! ```
//! and then use it in your example or tests as
//! ```ignore
//! let (train, valid) = sylva_datasets::tennis()
//! .split_with_ratio(0.8);
//!  /// ...
//! ```
//!
//! Other files are read with [`load_csv`] or through a [`Config`].

pub mod config;
mod dataset;
mod error;
pub mod generate;

pub use config::Config;
pub use dataset::*;
pub use error::{ReadError, Result};
