//!
//! # ID3 decision tree learning
//! `sylva-id3` aims to provide a pure Rust implementation of the ID3 decision tree learning
//! algorithm for categorical data.
//!
//! # The big picture
//!
//! `sylva-id3` is a crate in the `sylva` workspace, which provides categorical datasets, the
//! `Fit`/`Predict` traits and classification metrics in the `sylva` crate and data loading in
//! `sylva-datasets`.
//!
//! ID3 builds a multiway decision tree top-down. At every node the attribute with the biggest
//! information gain on the target field is selected and one branch is created for each of its
//! values. The resulting tree can predict labels of new records and be read as a set of
//! `IF ... THEN ...` [rules](Rule).
//!
//! # Current state
//!
//! `sylva-id3` currently provides an [implementation](Id3Tree) of single-tree fitting for
//! classification with an optional limit on the depth of the tree.
//!
//! ```rust
//! use sylva::prelude::*;
//! use sylva_id3::Id3Tree;
//!
//! let dataset = Dataset::new(
//!     vec![
//!         vec!["x", "0"],
//!         vec!["x", "0"],
//!         vec!["y", "1"],
//!         vec!["y", "1"],
//!     ],
//!     vec!["A", "label"],
//! )
//! .unwrap();
//!
//! let tree = Id3Tree::params().target("label").fit(&dataset).unwrap();
//!
//! assert_eq!(tree.root_node().attribute(), Some("A"));
//! for rule in tree.rules() {
//!     println!("{}", rule);
//! }
//! ```

mod id3;

pub use id3::*;

// Re-export the common Result alias for convenience
pub use sylva::error::Result;
