//! Sigclust Cluster Builder
//!
//! Agglomerative hierarchical clustering of exposure vectors and conversion
//! of the resulting merge structure into a labeled, serializable tree.
//!
//! # Overview
//!
//! ```text
//! exposure vectors → ward_linkage → MergeTree → label_tree → LabeledTree
//! ```
//!
//! - [`ward_linkage`] runs minimum-variance (Ward) linkage over Euclidean
//!   distances and records every merge in an arena ([`MergeTree`]). Leaves
//!   are numbered `0..R` in row order, merges `R..2R-1` in creation order.
//! - [`label_tree`] folds the arena bottom-up. Each leaf is named by its
//!   sample id; each internal node by the sorted, `-`-joined leaf names of its
//!   subtree. The real root is wrapped in a synthetic `"root"` container.
//!
//! # Example
//!
//! ```
//! use sigclust_cluster::{label_tree, ward_linkage};
//! use sigclust_domain::SampleId;
//!
//! let observations = vec![vec![0.0, 1.0], vec![10.0, 1.0], vec![10.5, 1.0]];
//! let labels = vec![SampleId::from("A1"), SampleId::from("A2"), SampleId::from("B1")];
//!
//! let tree = ward_linkage(&observations).unwrap();
//! let labeled = label_tree(&tree, &labels).unwrap();
//!
//! assert_eq!(labeled.name, "root");
//! assert_eq!(labeled.children[0].name, "A1-A2-B1");
//! assert_eq!(labeled.children[0].children[1].name, "A2-B1");
//! ```

#![warn(missing_docs)]

mod error;
mod labeler;
mod linkage;
mod tree;

pub use error::ClusterError;
pub use labeler::{label_tree, LabeledTree, LABEL_SEPARATOR, ROOT_NAME};
pub use linkage::{ward_linkage, ward_linkage_cancellable};
pub use tree::{Merge, MergeTree, Node, NodeId};
