//! Decision rules extracted from a tree
//!
use std::fmt;

use sylva::Record;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::TreeNode;

/// A path from the root of a decision tree to one of its leaves
///
/// The rule reads as a conjunction of attribute/value conditions implying a label and prints as
/// `IF outlook EQUALS sunny AND humidity EQUALS high THEN no`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rule {
    conditions: Vec<(String, String)>,
    label: String,
}

impl Rule {
    /// The `(attribute, value)` conditions in the order of the path
    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    /// The label implied by the conditions
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns true if the record satisfies every condition of the rule
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.conditions
            .iter()
            .all(|(attribute, value)| record.value(attribute) == Some(value.as_str()))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, (attribute, value)) in self.conditions.iter().enumerate() {
            let keyword = if idx == 0 { "IF" } else { " AND" };
            write!(f, "{} {} EQUALS {}", keyword, attribute, value)?;
        }

        if self.conditions.is_empty() {
            write!(f, "THEN {}", self.label)
        } else {
            write!(f, " THEN {}", self.label)
        }
    }
}

/// Collect one rule for every path from `root` to a leaf
///
/// The tree is traversed depth first and siblings are visited in the order of their attribute
/// values. Internal nodes without branches do not produce a rule.
pub fn extract_rules(root: &TreeNode) -> Vec<Rule> {
    let mut rules = Vec::new();
    let mut path = Vec::new();

    traverse(root, &mut path, &mut rules);

    rules
}

fn traverse(node: &TreeNode, path: &mut Vec<(String, String)>, rules: &mut Vec<Rule>) {
    match node {
        TreeNode::Leaf { label } => rules.push(Rule {
            conditions: path.clone(),
            label: label.clone(),
        }),
        TreeNode::Decision {
            attribute,
            children,
            ..
        } => {
            for (value, child) in children {
                path.push((attribute.clone(), value.clone()));
                traverse(child, path, rules);
                path.pop();
            }
        }
    }
}
