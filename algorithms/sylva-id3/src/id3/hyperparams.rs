use sylva::{
    error::{Error, Result},
    ParamGuard,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::Id3Tree;

/// The set of hyperparameters that can be specified for fitting an
/// [ID3 decision tree](struct.Id3Tree.html).
///
/// ### Example
///
/// ```rust
/// use sylva_id3::Id3Tree;
/// use sylva::prelude::*;
///
/// // Initialize the default set of parameters
/// let params = Id3Tree::params();
/// // Set the parameters to the desired values
/// let params = params.target("play").max_depth(Some(2));
///
/// // Load the data
/// let dataset = sylva_datasets::tennis();
/// // Fit the decision tree on the training data
/// let tree = params.fit(&dataset).unwrap();
/// // The tree is never deeper than requested
/// assert!(tree.depth() <= 2);
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Id3ValidParams {
    target: String,
    max_depth: Option<usize>,
    attributes: Option<Vec<String>>,
}

impl Id3ValidParams {
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn attributes(&self) -> Option<&[String]> {
        self.attributes.as_deref()
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Id3Params(Id3ValidParams);

impl Id3Params {
    pub fn new() -> Self {
        Self(Id3ValidParams {
            target: "label".to_string(),
            max_depth: None,
            attributes: None,
        })
    }

    /// Sets the field whose values the tree learns to predict
    pub fn target<S: Into<String>>(mut self, target: S) -> Self {
        self.0.target = target.into();
        self
    }

    /// Sets the optional limit to the depth of the decision tree
    ///
    /// A limit of zero produces a single leaf with the most common label.
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.0.max_depth = max_depth;
        self
    }

    /// Restricts the fields the tree may split on
    ///
    /// If not set, every field of the dataset except the target is a candidate.
    pub fn attributes(mut self, attributes: Option<Vec<String>>) -> Self {
        self.0.attributes = attributes;
        self
    }
}

impl Default for Id3Params {
    fn default() -> Self {
        Self::new()
    }
}

impl Id3Tree {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `target = "label"`
    /// * `max_depth = None`
    /// * `attributes = None`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> Id3Params {
        Id3Params::new()
    }
}

impl ParamGuard for Id3Params {
    type Checked = Id3ValidParams;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.target.is_empty() {
            return Err(Error::Parameters(
                "target field name should not be empty".to_string(),
            ));
        }

        match &self.0.attributes {
            Some(attributes) if attributes.contains(&self.0.target) => {
                Err(Error::Parameters(format!(
                    "target field `{}` cannot be used as an attribute",
                    self.0.target
                )))
            }
            _ => Ok(&self.0),
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
