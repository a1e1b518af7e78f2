//! Arena representation of a hierarchical clustering
//!
//! Nodes live in one flat vector indexed by [`NodeId`]. Ids `0..leaf_count`
//! are leaves in observation order; every merge appends one internal node,
//! so the last node is always the root.

/// Index of a node in a [`MergeTree`]
pub type NodeId = usize;

/// A node of the merge tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An original observation
    Leaf {
        /// Row index of the observation
        row: usize,
    },

    /// A cluster formed by merging two earlier nodes
    Internal {
        /// Child with the smaller node id
        left: NodeId,
        /// Child with the larger node id
        right: NodeId,
        /// Linkage distance at which the children merged
        distance: f64,
        /// Number of observations under this node
        size: usize,
    },
}

/// One merge event, in the shape of a linkage matrix row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Node id created by this merge
    pub id: NodeId,
    /// Smaller child id
    pub left: NodeId,
    /// Larger child id
    pub right: NodeId,
    /// Merge distance
    pub distance: f64,
    /// Observations in the merged cluster
    pub size: usize,
}

/// Binary merge tree produced by agglomerative clustering
#[derive(Debug, Clone, PartialEq)]
pub struct MergeTree {
    nodes: Vec<Node>,
    leaf_count: usize,
}

impl MergeTree {
    /// Create a forest of `leaf_count` unmerged leaves
    pub(crate) fn with_leaves(leaf_count: usize) -> Self {
        let mut nodes = Vec::with_capacity(leaf_count.saturating_mul(2).saturating_sub(1));
        nodes.extend((0..leaf_count).map(|row| Node::Leaf { row }));
        Self { nodes, leaf_count }
    }

    /// Record a merge of `a` and `b`, returning the new node id
    pub(crate) fn push_merge(&mut self, a: NodeId, b: NodeId, distance: f64, size: usize) -> NodeId {
        let (left, right) = if a < b { (a, b) } else { (b, a) };
        self.nodes.push(Node::Internal {
            left,
            right,
            distance,
            size,
        });
        self.nodes.len() - 1
    }

    /// Number of leaves (observations)
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Total number of nodes (`2 * leaf_count - 1` once complete)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Id of the root node
    pub fn root(&self) -> NodeId {
        self.nodes.len().saturating_sub(1)
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes, indexed by id
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Merge events in creation order
    pub fn merges(&self) -> Vec<Merge> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(id, node)| match node {
                Node::Internal {
                    left,
                    right,
                    distance,
                    size,
                } => Some(Merge {
                    id,
                    left: *left,
                    right: *right,
                    distance: *distance,
                    size: *size,
                }),
                Node::Leaf { .. } => None,
            })
            .collect()
    }

    /// Node ids in post-order (left subtree, right subtree, node)
    ///
    /// Iterative, so deep chains cannot overflow the stack.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        if self.nodes.is_empty() {
            return order;
        }

        let mut stack = vec![(self.root(), false)];
        while let Some((id, expanded)) = stack.pop() {
            match &self.nodes[id] {
                Node::Internal { left, right, .. } if !expanded => {
                    stack.push((id, true));
                    stack.push((*right, false));
                    stack.push((*left, false));
                }
                _ => order.push(id),
            }
        }
        order
    }

    /// Observation rows under `id`, left to right
    pub fn leaf_rows(&self, id: NodeId) -> Vec<usize> {
        let mut rows = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match self.nodes.get(current) {
                Some(Node::Leaf { row }) => rows.push(*row),
                Some(Node::Internal { left, right, .. }) => {
                    stack.push(*right);
                    stack.push(*left);
                }
                None => {}
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_leaf_tree() -> MergeTree {
        let mut tree = MergeTree::with_leaves(3);
        let first = tree.push_merge(2, 1, 0.5, 2);
        tree.push_merge(first, 0, 4.0, 3);
        tree
    }

    #[test]
    fn test_merge_orders_children_by_id() {
        let tree = three_leaf_tree();
        assert_eq!(
            tree.node(3),
            Some(&Node::Internal {
                left: 1,
                right: 2,
                distance: 0.5,
                size: 2
            })
        );
        assert_eq!(
            tree.node(4),
            Some(&Node::Internal {
                left: 0,
                right: 3,
                distance: 4.0,
                size: 3
            })
        );
    }

    #[test]
    fn test_counts_and_root() {
        let tree = three_leaf_tree();
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.root(), 4);
    }

    #[test]
    fn test_post_order_visits_each_node_once() {
        let tree = three_leaf_tree();
        assert_eq!(tree.post_order(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_merges_and_leaf_rows() {
        let tree = three_leaf_tree();
        let merges = tree.merges();
        assert_eq!(merges.len(), 2);
        assert_eq!(merges[0].id, 3);
        assert_eq!(merges[1].size, 3);
        assert_eq!(tree.leaf_rows(tree.root()), vec![0, 1, 2]);
        assert_eq!(tree.leaf_rows(3), vec![1, 2]);
    }
}
