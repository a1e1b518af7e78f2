//! Labeled output tree
//!
//! Converts a [`MergeTree`] into nested `{ name, children }` nodes ready for
//! JSON serialization. Names are derived bottom-up from leaf sample ids only,
//! never from clustering node ids, so the same sample set always produces the
//! same internal names whatever the input row order was.

use crate::tree::{MergeTree, Node};
use crate::ClusterError;
use serde::{Deserialize, Serialize};
use sigclust_domain::SampleId;

/// Name of the synthetic container wrapping the real root
pub const ROOT_NAME: &str = "root";

/// Separator between leaf names in an internal node's name
pub const LABEL_SEPARATOR: &str = "-";

/// A node of the labeled tree
///
/// Leaves carry a sample id as `name` and have no children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledTree {
    /// Sample id (leaf) or sorted, `-`-joined leaf names (internal)
    pub name: String,

    /// Ordered children; empty for leaves
    pub children: Vec<LabeledTree>,
}

impl LabeledTree {
    /// Create a leaf
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// True if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Leaf names under this node, left to right
    pub fn leaf_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                names.push(node.name.as_str());
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        names
    }

    /// Number of leaves under this node
    pub fn leaf_count(&self) -> usize {
        self.leaf_names().len()
    }

    /// Number of non-leaf nodes in this subtree, including this one
    pub fn internal_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if !node.is_leaf() {
                count += 1;
                stack.extend(node.children.iter());
            }
        }
        count
    }
}

/// Build the labeled tree for `tree`, naming leaf `i` after `labels[i]`
///
/// The result is a synthetic [`ROOT_NAME`] node whose single child is the
/// real root. Duplicate labels are kept: a sample id that occurs twice shows
/// up twice in every ancestor's name.
///
/// # Errors
/// Returns [`ClusterError::LabelCountMismatch`] if `labels` does not have one
/// entry per leaf, and [`ClusterError::MalformedTree`] if a node is unreachable
/// or reached twice.
pub fn label_tree(tree: &MergeTree, labels: &[SampleId]) -> Result<LabeledTree, ClusterError> {
    if labels.len() != tree.leaf_count() {
        return Err(ClusterError::LabelCountMismatch {
            labels: labels.len(),
            leaves: tree.leaf_count(),
        });
    }
    if tree.node_count() == 0 {
        return Err(ClusterError::MalformedTree("tree has no nodes".to_string()));
    }

    // Per node: leaf names of the subtree (sorted) and the finished output node.
    let mut built: Vec<Option<(Vec<&str>, LabeledTree)>> =
        (0..tree.node_count()).map(|_| None).collect();

    for id in tree.post_order() {
        let entry = match tree.node(id) {
            Some(Node::Leaf { row }) => {
                let name = labels
                    .get(*row)
                    .ok_or_else(|| {
                        ClusterError::MalformedTree(format!("leaf {} has no row {}", id, row))
                    })?
                    .as_str();
                (vec![name], LabeledTree::leaf(name))
            }
            Some(Node::Internal { left, right, .. }) => {
                let (mut names, left_tree) = take_built(&mut built, *left)?;
                let (right_names, right_tree) = take_built(&mut built, *right)?;
                names.extend(right_names);
                names.sort_unstable();

                let name = names.join(LABEL_SEPARATOR);
                (
                    names,
                    LabeledTree {
                        name,
                        children: vec![left_tree, right_tree],
                    },
                )
            }
            None => {
                return Err(ClusterError::MalformedTree(format!("missing node {}", id)));
            }
        };
        built[id] = Some(entry);
    }

    let (_, root) = take_built(&mut built, tree.root())?;
    Ok(LabeledTree {
        name: ROOT_NAME.to_string(),
        children: vec![root],
    })
}

fn take_built<'a>(
    built: &mut [Option<(Vec<&'a str>, LabeledTree)>],
    id: usize,
) -> Result<(Vec<&'a str>, LabeledTree), ClusterError> {
    built
        .get_mut(id)
        .and_then(Option::take)
        .ok_or_else(|| ClusterError::MalformedTree(format!("node {} visited out of order", id)))
}
