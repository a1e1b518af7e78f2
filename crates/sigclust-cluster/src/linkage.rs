//! Ward (minimum-variance) agglomerative linkage
//!
//! Repeatedly merges the globally closest pair of active clusters and updates
//! distances to the merged cluster with the Lance–Williams recurrence for
//! Ward's criterion:
//!
//! ```text
//! d(k, i∪j) = sqrt(((n_i + n_k)·d(k,i)² + (n_j + n_k)·d(k,j)² − n_k·d(i,j)²) / (n_i + n_j + n_k))
//! ```
//!
//! Equal distances are resolved in favour of the lexicographically smallest
//! `(min id, max id)` node pair, so a fixed input order always yields the
//! same tree. Each active cluster caches its nearest neighbour; only caches
//! that pointed at the merged clusters are recomputed after a merge.

use crate::tree::{MergeTree, NodeId};
use crate::ClusterError;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Run Ward linkage over `observations` (one row per observation)
///
/// # Errors
/// - [`ClusterError::InsufficientObservations`] for fewer than two rows
/// - [`ClusterError::EmptyDimension`] / [`ClusterError::DimensionMismatch`] for malformed rows
/// - [`ClusterError::NonFinite`] if any input value is NaN or infinite
/// - [`ClusterError::Numerical`] if a distance overflows
pub fn ward_linkage(observations: &[Vec<f64>]) -> Result<MergeTree, ClusterError> {
    ward_linkage_cancellable(observations, &AtomicBool::new(false))
}

/// Run Ward linkage, aborting with [`ClusterError::Cancelled`] once `cancel` is set
///
/// The flag is checked before every merge step.
pub fn ward_linkage_cancellable(
    observations: &[Vec<f64>],
    cancel: &AtomicBool,
) -> Result<MergeTree, ClusterError> {
    validate(observations)?;

    let n = observations.len();
    debug!(
        "Ward linkage over {} observations of dimension {}",
        n,
        observations[0].len()
    );

    let mut state = WardState::new(observations)?;
    let mut tree = MergeTree::with_leaves(n);

    for _ in 1..n {
        if cancel.load(Ordering::Relaxed) {
            return Err(ClusterError::Cancelled);
        }

        let (a, b, distance) = state.closest_pair()?.ok_or_else(|| {
            ClusterError::MalformedTree("no active pair left to merge".to_string())
        })?;
        let size = state.size(a)? + state.size(b)?;
        let id = tree.push_merge(state.id(a)?, state.id(b)?, distance, size);
        state.merge(a, b, id)?;
    }

    Ok(tree)
}

fn validate(observations: &[Vec<f64>]) -> Result<(), ClusterError> {
    if observations.len() < 2 {
        return Err(ClusterError::InsufficientObservations {
            found: observations.len(),
        });
    }

    let dimension = observations[0].len();
    if dimension == 0 {
        return Err(ClusterError::EmptyDimension);
    }

    for (row, values) in observations.iter().enumerate() {
        if values.len() != dimension {
            return Err(ClusterError::DimensionMismatch {
                row,
                expected: dimension,
                found: values.len(),
            });
        }
        if let Some(column) = values.iter().position(|v| !v.is_finite()) {
            return Err(ClusterError::NonFinite { row, column });
        }
    }

    Ok(())
}

/// Upper-triangular pairwise distances between slots
struct CondensedDistances {
    n: usize,
    values: Vec<f64>,
}

impl CondensedDistances {
    fn euclidean(observations: &[Vec<f64>]) -> Result<Self, ClusterError> {
        let n = observations.len();
        let mut values = Vec::with_capacity(n * (n - 1) / 2);

        for i in 0..n {
            for j in (i + 1)..n {
                let squared: f64 = observations[i]
                    .iter()
                    .zip(&observations[j])
                    .map(|(x, y)| (x - y) * (x - y))
                    .sum();
                let distance = squared.sqrt();
                if !distance.is_finite() {
                    return Err(ClusterError::Numerical(format!(
                        "distance between observations {} and {} is not finite",
                        i, j
                    )));
                }
                values.push(distance);
            }
        }

        Ok(Self { n, values })
    }

    fn index(&self, i: usize, j: usize) -> usize {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        self.n * i - i * (i + 1) / 2 + (j - i - 1)
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self.values[self.index(i, j)]
    }

    fn set(&mut self, i: usize, j: usize, value: f64) {
        let index = self.index(i, j);
        self.values[index] = value;
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveCluster {
    id: NodeId,
    size: usize,
}

#[derive(Debug, Clone, Copy)]
struct Neighbor {
    slot: usize,
    distance: f64,
}

fn pair_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Working state: one slot per original observation, emptied as clusters merge
struct WardState {
    distances: CondensedDistances,
    clusters: Vec<Option<ActiveCluster>>,
    nearest: Vec<Option<Neighbor>>,
}

impl WardState {
    fn new(observations: &[Vec<f64>]) -> Result<Self, ClusterError> {
        let n = observations.len();
        let mut state = Self {
            distances: CondensedDistances::euclidean(observations)?,
            clusters: (0..n).map(|id| Some(ActiveCluster { id, size: 1 })).collect(),
            nearest: vec![None; n],
        };
        for slot in 0..n {
            state.refresh_nearest(slot)?;
        }
        Ok(state)
    }

    fn cluster(&self, slot: usize) -> Result<ActiveCluster, ClusterError> {
        self.clusters.get(slot).copied().flatten().ok_or_else(|| {
            ClusterError::MalformedTree(format!("slot {} holds no active cluster", slot))
        })
    }

    fn id(&self, slot: usize) -> Result<NodeId, ClusterError> {
        Ok(self.cluster(slot)?.id)
    }

    fn size(&self, slot: usize) -> Result<usize, ClusterError> {
        Ok(self.cluster(slot)?.size)
    }

    fn active_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.clusters
            .iter()
            .enumerate()
            .filter_map(|(slot, cluster)| cluster.map(|_| slot))
    }

    /// Whether `candidate` beats `current` as the nearest neighbour of `slot`
    fn precedes(
        &self,
        slot: usize,
        candidate: Neighbor,
        current: Option<Neighbor>,
    ) -> Result<bool, ClusterError> {
        let Some(current) = current else {
            return Ok(true);
        };
        if candidate.distance != current.distance {
            return Ok(candidate.distance < current.distance);
        }
        let id = self.id(slot)?;
        Ok(pair_key(id, self.id(candidate.slot)?) < pair_key(id, self.id(current.slot)?))
    }

    fn refresh_nearest(&mut self, slot: usize) -> Result<(), ClusterError> {
        let mut best = None;
        for other in self.active_slots() {
            if other == slot {
                continue;
            }
            let candidate = Neighbor {
                slot: other,
                distance: self.distances.get(slot, other),
            };
            if self.precedes(slot, candidate, best)? {
                best = Some(candidate);
            }
        }
        self.nearest[slot] = best;
        Ok(())
    }

    fn closest_pair(&self) -> Result<Option<(usize, usize, f64)>, ClusterError> {
        let mut best: Option<(f64, (NodeId, NodeId), usize, usize)> = None;
        for slot in self.active_slots() {
            let Some(neighbor) = self.nearest[slot] else {
                continue;
            };
            let key = pair_key(self.id(slot)?, self.id(neighbor.slot)?);
            let better = match best {
                None => true,
                Some((distance, best_key, _, _)) => {
                    neighbor.distance < distance
                        || (neighbor.distance == distance && key < best_key)
                }
            };
            if better {
                best = Some((neighbor.distance, key, slot, neighbor.slot));
            }
        }
        Ok(best.map(|(distance, _, a, b)| (a, b, distance)))
    }

    /// Replace slots `a` and `b` by the merged cluster `id`
    fn merge(&mut self, a: usize, b: usize, id: NodeId) -> Result<(), ClusterError> {
        let (keep, gone) = if a < b { (a, b) } else { (b, a) };
        let n_i = self.size(keep)? as f64;
        let n_j = self.size(gone)? as f64;
        let d_ij = self.distances.get(keep, gone);

        let others: Vec<usize> = self
            .active_slots()
            .filter(|&k| k != keep && k != gone)
            .collect();

        for &k in &others {
            let n_k = self.size(k)? as f64;
            let d_ik = self.distances.get(k, keep);
            let d_jk = self.distances.get(k, gone);
            let numerator =
                (n_i + n_k) * d_ik * d_ik + (n_j + n_k) * d_jk * d_jk - n_k * d_ij * d_ij;
            let updated = (numerator / (n_i + n_j + n_k)).max(0.0).sqrt();
            if !updated.is_finite() {
                return Err(ClusterError::Numerical(format!(
                    "Ward update for node {} produced a non-finite distance",
                    id
                )));
            }
            self.distances.set(k, keep, updated);
        }

        self.clusters[keep] = Some(ActiveCluster {
            id,
            size: (n_i + n_j) as usize,
        });
        self.clusters[gone] = None;
        self.nearest[gone] = None;
        self.refresh_nearest(keep)?;

        for &k in &others {
            let current = self.nearest[k];
            match current {
                Some(neighbor) if neighbor.slot == keep || neighbor.slot == gone => {
                    self.refresh_nearest(k)?;
                }
                _ => {
                    let candidate = Neighbor {
                        slot: keep,
                        distance: self.distances.get(k, keep),
                    };
                    if self.precedes(k, candidate, current)? {
                        self.nearest[k] = Some(candidate);
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;

    fn internal(tree: &MergeTree, id: NodeId) -> (NodeId, NodeId, f64) {
        match tree.node(id) {
            Some(Node::Internal {
                left,
                right,
                distance,
                ..
            }) => (*left, *right, *distance),
            other => panic!("expected internal node at {}, got {:?}", id, other),
        }
    }

    #[test]
    fn test_two_observations() {
        let tree = ward_linkage(&[vec![0.0, 0.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(tree.node_count(), 3);
        let (left, right, distance) = internal(&tree, 2);
        assert_eq!((left, right), (0, 1));
        assert!((distance - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_closest_pair_merges_first() {
        let observations = vec![vec![0.0], vec![10.0], vec![10.5]];
        let tree = ward_linkage(&observations).unwrap();

        assert_eq!(internal(&tree, 3).0, 1);
        assert_eq!(internal(&tree, 3).1, 2);
        let (left, right, _) = internal(&tree, 4);
        assert_eq!((left, right), (0, 3));
    }

    #[test]
    fn test_ward_distances_match_reference() {
        // Two tight pairs five units apart; Ward distance between the pairs
        // is sqrt(2 * 2 * 2 / 4) * 5.
        let observations = vec![vec![0.0], vec![1.0], vec![5.0], vec![6.0]];
        let tree = ward_linkage(&observations).unwrap();
        let merges = tree.merges();

        assert_eq!((merges[0].left, merges[0].right), (0, 1));
        assert!((merges[0].distance - 1.0).abs() < 1e-12);
        assert_eq!((merges[1].left, merges[1].right), (2, 3));
        assert!((merges[1].distance - 1.0).abs() < 1e-12);
        assert_eq!((merges[2].left, merges[2].right), (4, 5));
        assert!((merges[2].distance - 50f64.sqrt()).abs() < 1e-9);
        assert_eq!(merges[2].size, 4);
    }

    #[test]
    fn test_ties_prefer_smaller_pair() {
        let observations = vec![vec![0.0], vec![1.0], vec![2.0]];
        let tree = ward_linkage(&observations).unwrap();
        assert_eq!(internal(&tree, 3).0, 0);
        assert_eq!(internal(&tree, 3).1, 1);
        assert_eq!(internal(&tree, 4).0, 2);
        assert_eq!(internal(&tree, 4).1, 3);
    }

    #[test]
    fn test_identical_observations() {
        let observations = vec![vec![1.0, 1.0]; 4];
        let tree = ward_linkage(&observations).unwrap();
        let merges = tree.merges();
        assert_eq!(merges.len(), 3);
        assert!(merges.iter().all(|m| m.distance == 0.0));
        assert_eq!((merges[0].left, merges[0].right), (0, 1));
        assert_eq!((merges[1].left, merges[1].right), (2, 3));
        assert_eq!((merges[2].left, merges[2].right), (4, 5));
    }

    #[test]
    fn test_merge_distances_are_monotone() {
        let observations = vec![
            vec![0.1, 3.0],
            vec![2.5, 0.4],
            vec![7.0, 7.5],
            vec![0.0, 2.9],
            vec![6.8, 7.9],
            vec![2.2, 0.0],
        ];
        let tree = ward_linkage(&observations).unwrap();
        let merges = tree.merges();
        for pair in merges.windows(2) {
            assert!(pair[0].distance <= pair[1].distance + 1e-12);
        }
    }

    #[test]
    fn test_rejects_too_few_observations() {
        assert_eq!(
            ward_linkage(&Vec::<Vec<f64>>::new()),
            Err(ClusterError::InsufficientObservations { found: 0 })
        );
        assert_eq!(
            ward_linkage(&[vec![1.0]]),
            Err(ClusterError::InsufficientObservations { found: 1 })
        );
    }

    #[test]
    fn test_rejects_malformed_rows() {
        assert_eq!(
            ward_linkage(&[Vec::<f64>::new(), Vec::new()]),
            Err(ClusterError::EmptyDimension)
        );
        assert!(matches!(
            ward_linkage(&[vec![1.0, 2.0], vec![1.0]]),
            Err(ClusterError::DimensionMismatch { row: 1, expected: 2, found: 1 })
        ));
        assert_eq!(
            ward_linkage(&[vec![1.0, 2.0], vec![1.0, f64::NAN]]),
            Err(ClusterError::NonFinite { row: 1, column: 1 })
        );
    }

    #[test]
    fn test_overflowing_distance_is_numerical_failure() {
        let observations = vec![vec![f64::MAX, 0.0], vec![-f64::MAX, 0.0]];
        assert!(matches!(
            ward_linkage(&observations),
            Err(ClusterError::Numerical(_))
        ));
    }

    #[test]
    fn test_cancel_flag_aborts() {
        let cancel = AtomicBool::new(true);
        let result = ward_linkage_cancellable(&[vec![0.0], vec![1.0]], &cancel);
        assert_eq!(result, Err(ClusterError::Cancelled));
    }

    #[test]
    fn test_vacated_slot_is_malformed() {
        let mut state = WardState::new(&[vec![0.0], vec![1.0], vec![5.0]]).unwrap();
        state.merge(0, 1, 3).unwrap();

        assert!(matches!(state.size(1), Err(ClusterError::MalformedTree(_))));
        assert!(matches!(state.id(7), Err(ClusterError::MalformedTree(_))));
        assert!(matches!(
            state.merge(1, 2, 4),
            Err(ClusterError::MalformedTree(_))
        ));
        assert_eq!(state.size(0).unwrap(), 2);
        assert_eq!(state.id(0).unwrap(), 3);
    }
}
