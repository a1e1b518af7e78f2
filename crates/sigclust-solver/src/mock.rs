//! Deterministic solver for tests

use crate::SolverError;
use sigclust_domain::traits::ExposureSolver;
use sigclust_domain::{CountMatrix, ExposureMatrix, SignatureSet};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock solver returning pre-configured exposure vectors
///
/// Samples without a configured vector get the default vector. Vectors whose
/// length does not match the requested signature count are rejected by the
/// exposure matrix, which surfaces as a decomposition failure.
///
/// # Examples
///
/// ```
/// use sigclust_solver::MockSolver;
///
/// let mut solver = MockSolver::new(vec![1.0]);
/// solver.add_failure("BAD");
/// assert_eq!(solver.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockSolver {
    default_exposures: Vec<f64>,
    exposures: Arc<Mutex<HashMap<String, Vec<f64>>>>,
    failures: Arc<Mutex<HashSet<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockSolver {
    /// Create a solver returning `default_exposures` for every sample
    pub fn new(default_exposures: Vec<f64>) -> Self {
        Self {
            default_exposures,
            exposures: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashSet::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Set the exposure vector for one sample
    pub fn add_exposures(&mut self, sample: impl Into<String>, exposures: Vec<f64>) {
        self.exposures
            .lock()
            .unwrap()
            .insert(sample.into(), exposures);
    }

    /// Make any decomposition that includes `sample` fail
    pub fn add_failure(&mut self, sample: impl Into<String>) {
        self.failures.lock().unwrap().insert(sample.into());
    }

    /// Number of times `exposures` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockSolver {
    fn default() -> Self {
        Self::new(vec![0.0])
    }
}

impl ExposureSolver for MockSolver {
    type Error = SolverError;

    fn exposures(
        &self,
        counts: &CountMatrix,
        signatures: &SignatureSet,
    ) -> Result<ExposureMatrix, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let failures = self.failures.lock().unwrap();
        let exposures = self.exposures.lock().unwrap();

        let mut matrix = ExposureMatrix::for_signatures(signatures);
        for sample in counts.samples() {
            if failures.contains(sample.as_str()) {
                return Err(SolverError::Decomposition(format!(
                    "mock failure for sample '{}'",
                    sample
                )));
            }
            let values = exposures
                .get(sample.as_str())
                .cloned()
                .unwrap_or_else(|| self.default_exposures.clone());
            matrix.push_row(sample.clone(), values)?;
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigclust_domain::MutationType;

    fn counts(samples: &[&str]) -> CountMatrix {
        let mut counts = CountMatrix::new(vec!["C>A".to_string()]);
        for sample in samples {
            counts.push_row(*sample, vec![Some(1.0)]).unwrap();
        }
        counts
    }

    fn signatures() -> SignatureSet {
        SignatureSet::new(MutationType::Sbs, ["SBS1", "SBS5"]).unwrap()
    }

    #[test]
    fn test_configured_and_default_exposures() {
        let mut solver = MockSolver::new(vec![0.5, 0.5]);
        solver.add_exposures("S1", vec![1.0, 2.0]);

        let result = solver.exposures(&counts(&["S1", "S2"]), &signatures()).unwrap();
        assert_eq!(result.vectors(), vec![vec![1.0, 2.0], vec![0.5, 0.5]]);
        assert_eq!(result.signatures(), &["SBS1", "SBS5"]);
    }

    #[test]
    fn test_injected_failure() {
        let mut solver = MockSolver::new(vec![0.5, 0.5]);
        solver.add_failure("S2");
        let result = solver.exposures(&counts(&["S1", "S2"]), &signatures());
        assert!(matches!(result, Err(SolverError::Decomposition(_))));
    }

    #[test]
    fn test_wrong_dimension_is_rejected() {
        let solver = MockSolver::new(vec![1.0]);
        let result = solver.exposures(&counts(&["S1"]), &signatures());
        assert!(matches!(result, Err(SolverError::InvalidExposures(_))));
    }

    #[test]
    fn test_call_count_shared_between_clones() {
        let solver = MockSolver::new(vec![0.0, 0.0]);
        let clone = solver.clone();
        solver.exposures(&counts(&["S1"]), &signatures()).unwrap();
        assert_eq!(clone.call_count(), 1);
        clone.reset_call_count();
        assert_eq!(solver.call_count(), 0);
    }
}
