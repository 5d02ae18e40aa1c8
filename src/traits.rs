//! Provide traits for different classes of algorithms
//!

use crate::dataset::Dataset;
use std::error::Error;

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// a decision tree learns which attribute values lead to which label and keeps them in a tree of
/// decisions. The fitted object can then be used for predictions.
///
/// Every fittable algorithm reads its target field from its own parameters, so the dataset is
/// passed untouched.
pub trait Fit<E: Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &Dataset) -> Result<Self::Object, E>;
}

/// Predict with model
///
/// This trait assumes the `Fit` trait was used to train a model and makes predictions for
/// individual records or whole datasets.
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}
