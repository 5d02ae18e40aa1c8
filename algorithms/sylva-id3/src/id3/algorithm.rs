//! ID3 decision trees
//!
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use log::{debug, info};

use super::entropy::{average_entropy, entropy};
use super::{extract_rules, Id3ValidParams, NodeIter, Rule};
use sylva::{
    dataset::Row,
    error::{Error, Result},
    traits::*,
    Dataset, Record, ValueUniverse,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
/// A node in the decision tree
pub enum TreeNode {
    /// Terminal node predicting a single label
    Leaf { label: String },
    /// Internal node with one branch per known value of the splitting attribute
    Decision {
        attribute: String,
        gain: f64,
        children: BTreeMap<String, TreeNode>,
    },
}

impl TreeNode {
    pub fn leaf<S: Into<String>>(label: S) -> Self {
        TreeNode::Leaf {
            label: label.into(),
        }
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Returns `Some(label)` for leaf nodes and `None` for internal nodes.
    pub fn prediction(&self) -> Option<&str> {
        match self {
            TreeNode::Leaf { label } => Some(label.as_str()),
            TreeNode::Decision { .. } => None,
        }
    }

    /// Returns the name of the attribute used in the split if the node is internal,
    /// `None` otherwise
    pub fn attribute(&self) -> Option<&str> {
        match self {
            TreeNode::Decision { attribute, .. } => Some(attribute.as_str()),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Returns the information gain of the split if the node is internal, `None` otherwise
    pub fn gain(&self) -> Option<f64> {
        match self {
            TreeNode::Decision { gain, .. } => Some(*gain),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Returns the branches of an internal node, keyed by attribute value
    pub fn branches(&self) -> Option<&BTreeMap<String, TreeNode>> {
        match self {
            TreeNode::Decision { children, .. } => Some(children),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Returns all children in the order of their attribute values
    pub fn children(&self) -> Vec<&TreeNode> {
        self.branches()
            .map(|children| children.values().collect())
            .unwrap_or_default()
    }

    /// Number of decision levels below and including this node
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Decision { children, .. } => {
                1 + children.values().map(TreeNode::depth).max().unwrap_or(0)
            }
        }
    }

    /// Walk the tree following the values of `record`
    ///
    /// Returns `None` if the record has a value which was not seen during training for one of
    /// the attributes on its path, or lacks such an attribute entirely.
    pub fn predict<R: Record + ?Sized>(&self, record: &R) -> Option<&str> {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { label } => return Some(label.as_str()),
                TreeNode::Decision {
                    attribute,
                    children,
                    ..
                } => {
                    let value = record.value(attribute)?;
                    node = children.get(value)?;
                }
            }
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        for (value, child) in self.branches().into_iter().flatten() {
            match child {
                TreeNode::Leaf { label } => {
                    writeln!(
                        f,
                        "{:indent$}{} = {} -> {}",
                        "",
                        self.attribute().unwrap_or_default(),
                        value,
                        label,
                        indent = indent
                    )?;
                }
                TreeNode::Decision {
                    attribute, gain, ..
                } => {
                    writeln!(
                        f,
                        "{:indent$}{} = {} -> split on {} (gain {:.4})",
                        "",
                        self.attribute().unwrap_or_default(),
                        value,
                        attribute,
                        gain,
                        indent = indent
                    )?;
                    child.fmt_indented(f, indent + 2)?;
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TreeNode::Leaf { label } => writeln!(f, "-> {}", label),
            TreeNode::Decision {
                attribute, gain, ..
            } => {
                writeln!(f, "split on {} (gain {:.4})", attribute, gain)?;
                self.fmt_indented(f, 2)
            }
        }
    }
}

/// Finds the most frequent label for a map of frequencies. If two
/// labels have the same count then the lexicographically smallest one is returned.
fn most_common_label(class_freq: &BTreeMap<String, usize>) -> Option<&String> {
    class_freq
        .iter()
        .fold(None, |acc, (label, freq)| match acc {
            Some((_, best_freq)) if best_freq >= freq => acc,
            _ => Some((label, freq)),
        })
        .map(|(label, _)| label)
}

/// Recursively induces a decision tree with the ID3 algorithm
///
/// ### Parameters
///
/// * `dataset`: the observations available in this node
/// * `universe`: the distinct values of every field in the full training data
/// * `remaining`: the attributes which have not been used on the path to this node
/// * `target`: the field to predict
/// * `max_depth`: the optional number of decision levels allowed below this node
///
/// ### Returns
///
/// The root of the induced (sub-)tree. An empty dataset cannot be labelled and results in
/// [`Error::EmptyDataset`], unknown fields in [`Error::UnknownField`].
pub fn build(
    dataset: &Dataset,
    universe: &ValueUniverse,
    remaining: &BTreeSet<String>,
    target: &str,
    max_depth: Option<usize>,
) -> Result<TreeNode> {
    // compute frequencies for target classes
    let labels = dataset.class_counts(target)?;
    // set our prediction for this subset to the modal class
    let prediction = most_common_label(&labels).ok_or(Error::EmptyDataset)?;

    // a pure subset is labelled directly
    if labels.len() == 1 {
        return Ok(TreeNode::leaf(prediction.as_str()));
    }

    if remaining.is_empty() {
        debug!(
            "no attributes left for {} samples, predicting `{}`",
            dataset.nsamples(),
            prediction
        );
        return Ok(TreeNode::leaf(prediction.as_str()));
    }

    if max_depth == Some(0) {
        debug!(
            "depth limit reached for {} samples, predicting `{}`",
            dataset.nsamples(),
            prediction
        );
        return Ok(TreeNode::leaf(prediction.as_str()));
    }

    let parent_entropy = entropy(labels.values());

    // Find the attribute with the biggest information gain. Attributes are visited in
    // lexicographic order and only a strictly bigger gain replaces the current best.
    let mut best = None;
    for attribute in remaining {
        let (avg_entropy, partitions) = average_entropy(dataset, attribute, target)?;
        let gain = parent_entropy - avg_entropy;

        best = match best.take() {
            None => Some((attribute, gain, partitions)),
            Some((_, best_gain, _)) if gain > best_gain => Some((attribute, gain, partitions)),
            x => x,
        };
    }

    let (attribute, gain, mut partitions) = match best {
        Some(best) => best,
        None => return Ok(TreeNode::leaf(prediction.as_str())),
    };

    debug!(
        "splitting {} samples on `{}` with information gain {:.4}",
        dataset.nsamples(),
        attribute,
        gain
    );

    let values = universe
        .get(attribute)
        .ok_or_else(|| Error::UnknownField(attribute.clone()))?;

    let mut subtree_attributes = remaining.clone();
    subtree_attributes.remove(attribute);
    let subtree_depth = max_depth.map(|depth| depth - 1);

    // every known value gets a branch, values without observations fall back to the
    // prediction of this node
    let mut children = BTreeMap::new();
    for value in values {
        let child = match partitions.remove(value) {
            Some(partition) => build(
                &partition,
                universe,
                &subtree_attributes,
                target,
                subtree_depth,
            )?,
            None => TreeNode::leaf(prediction.as_str()),
        };
        children.insert(value.clone(), child);
    }

    Ok(TreeNode::Decision {
        attribute: attribute.clone(),
        gain,
        children,
    })
}

/// A fitted ID3 decision tree for classification of categorical data.
///
/// ### Structure
/// The tree is a multiway tree where:
/// * each internal node splits on an attribute and has exactly one branch for every value this
/// attribute takes in the training data
/// * leaf nodes make predictions
///
/// ### Algorithm
///
/// Starting with a single root node, the tree is trained recursively by applying the following
/// rules to every node considered:
///
/// * If all observations share the same label, the node becomes a leaf with this label;
/// * If no attributes are left or the depth limit is reached, the node becomes a leaf with the
///   most common label;
/// * Otherwise the attribute with the biggest information gain is selected and a branch is
///   created for each of its values. Values without observations in the node become leaves with
///   the most common label of the node, the others are trained recursively without the selected
///   attribute.
///
/// Ties between labels are broken in favour of the lexicographically smallest label, ties between
/// attributes in favour of the lexicographically smallest name.
///
/// ### Predictions
///
/// To predict the label of a record, the tree is traversed from the root to a leaf, following the
/// branch matching the record's value of the splitting attribute. Records with a value that was
/// not seen during training get no prediction.
///
/// ### Example
///
/// ```rust
/// use sylva_id3::Id3Tree;
/// use sylva::prelude::*;
///
/// // Load the dataset
/// let dataset = sylva_datasets::tennis();
/// // Fit the tree
/// let tree = Id3Tree::params().target("play").fit(&dataset).unwrap();
/// // Get accuracy on training set
/// let accuracy = tree
///     .predict(&dataset)
///     .confusion_matrix(dataset.column("play").unwrap())
///     .unwrap()
///     .accuracy();
///
/// assert_eq!(accuracy, 1.0);
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Id3Tree {
    root_node: TreeNode,
    target: String,
    attributes: Vec<String>,
}

impl Fit<Error> for Id3ValidParams {
    type Object = Id3Tree;

    /// Fit a decision tree using `hyperparamters` on the dataset.
    fn fit(&self, dataset: &Dataset) -> Result<Self::Object> {
        dataset.field_index(self.target())?;

        let attributes: BTreeSet<String> = match self.attributes() {
            Some(attributes) => {
                for attribute in attributes {
                    dataset.field_index(attribute)?;
                }
                attributes.iter().cloned().collect()
            }
            None => dataset
                .header()
                .iter()
                .filter(|field| field.as_str() != self.target())
                .cloned()
                .collect(),
        };

        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let universe = dataset.value_universe();
        let root_node = build(
            dataset,
            &universe,
            &attributes,
            self.target(),
            self.max_depth(),
        )?;

        let tree = Id3Tree {
            root_node,
            target: self.target().to_string(),
            attributes: attributes.into_iter().collect(),
        };

        info!(
            "fitted tree for `{}` on {} samples: depth {}, {} leaves",
            tree.target,
            dataset.nsamples(),
            tree.depth(),
            tree.num_leaves()
        );

        Ok(tree)
    }
}

impl Id3Tree {
    /// Return root node of the tree
    pub fn root_node(&self) -> &TreeNode {
        &self.root_node
    }

    /// Return the field predicted by the tree
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Return the candidate attributes the tree was trained with
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Create a node iterator in level-order (BFT)
    pub fn iter_nodes(&self) -> NodeIter<'_> {
        NodeIter::new(&self.root_node)
    }

    /// Return the sorted attributes used in at least one split
    pub fn features(&self) -> Vec<&str> {
        self.iter_nodes()
            .filter_map(TreeNode::attribute)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Return the number of decision levels on the longest path
    pub fn depth(&self) -> usize {
        self.root_node.depth()
    }

    /// Return the number of leaves in this tree
    pub fn num_leaves(&self) -> usize {
        self.iter_nodes().filter(|node| node.is_leaf()).count()
    }

    /// Return the summed information gain of every attribute over all its splits
    pub fn total_gain(&self) -> HashMap<&str, f64> {
        let mut gains = HashMap::new();
        for node in self.iter_nodes() {
            if let TreeNode::Decision {
                attribute, gain, ..
            } = node
            {
                *gains.entry(attribute.as_str()).or_insert(0.0) += *gain;
            }
        }

        gains
    }

    /// Return one rule for every path from the root to a leaf
    pub fn rules(&self) -> Vec<Rule> {
        extract_rules(&self.root_node)
    }

    /// Predict the label of a single record
    ///
    /// Returns `None` if the record contains a value which was not seen during training.
    pub fn predict_record<R: Record + ?Sized>(&self, record: &R) -> Option<&str> {
        self.root_node.predict(record)
    }
}

impl fmt::Display for Id3Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.root_node)
    }
}

impl<'a> Predict<Row<'a>, Option<String>> for Id3Tree {
    fn predict(&self, x: Row<'a>) -> Option<String> {
        self.predict_record(&x).map(String::from)
    }
}

impl<'a, K, V, S> Predict<&'a HashMap<K, V, S>, Option<String>> for Id3Tree
where
    HashMap<K, V, S>: Record,
{
    fn predict(&self, x: &'a HashMap<K, V, S>) -> Option<String> {
        self.predict_record(x).map(String::from)
    }
}

impl<'a, K, V> Predict<&'a BTreeMap<K, V>, Option<String>> for Id3Tree
where
    BTreeMap<K, V>: Record,
{
    fn predict(&self, x: &'a BTreeMap<K, V>) -> Option<String> {
        self.predict_record(x).map(String::from)
    }
}

impl<'a> Predict<&'a Dataset, Vec<Option<String>>> for Id3Tree {
    /// Make predictions for each row of a dataset
    fn predict(&self, x: &'a Dataset) -> Vec<Option<String>> {
        x.rows()
            .map(|row| self.predict_record(&row).map(String::from))
            .collect()
    }
}
