//! `sylva` provides the building blocks for learning decision trees from categorical data.
//!
//! The crate contains the shared parts of the `sylva` workspace:
//!
//! * a categorical [`Dataset`] with named fields, projection and partitioning by value
//! * the [`Record`](dataset::Record) abstraction to feed single observations into fitted models
//! * the [`Fit`](traits::Fit) and [`Predict`](traits::Predict) traits and the
//!   [`ParamGuard`] for hyperparameter checking
//! * classification [metrics] to score predictions
//!
//! Learning algorithms live in their own crates, for example `sylva-id3` for ID3 decision trees,
//! while `sylva-datasets` loads data from CSV files.
//!
//! ## Example
//!
//! ```rust
//! use sylva::Dataset;
//!
//! let dataset = Dataset::new(
//!     vec![vec!["sunny", "hot", "no"], vec!["rain", "mild", "yes"]],
//!     vec!["outlook", "temperature", "play"],
//! )
//! .unwrap();
//!
//! let projected = dataset.project(&["outlook", "play"]).unwrap();
//! assert_eq!(projected.header(), &["outlook", "play"]);
//!
//! let counts = dataset.class_counts("play").unwrap();
//! assert_eq!(counts["yes"], 1);
//! ```

pub mod dataset;
pub mod error;
mod metrics_classification;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, Record, ValueUniverse};
pub use param_guard::ParamGuard;

/// Common metrics functions for classification
pub mod metrics {
    pub use crate::metrics_classification::{mean_std, ConfusionMatrix, ToConfusionMatrix};
}
