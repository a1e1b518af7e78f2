//! Lookup solver over a precomputed exposure table

use crate::SolverError;
use sigclust_domain::traits::ExposureSolver;
use sigclust_domain::{CountMatrix, ExposureMatrix, SignatureSet};
use sigclust_store::{tsv, StoreError};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Solver that answers from a precomputed samples × signatures table
///
/// The table is loaded once. Each call projects the requested signatures, in
/// requested order, for the samples present in the count matrix.
#[derive(Debug, Clone)]
pub struct PrecomputedSolver {
    signatures: HashMap<String, usize>,
    samples: HashMap<String, Vec<f64>>,
}

impl PrecomputedSolver {
    /// Load the exposure table from a TSV file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SolverError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let solver = Self::parse(&contents)?;
        debug!(
            "Loaded precomputed exposures for {} samples over {} signatures from {}",
            solver.samples.len(),
            solver.signatures.len(),
            path.display()
        );
        Ok(solver)
    }

    /// Parse an exposure table; first column is the sample id, the rest are signatures
    pub fn parse(contents: &str) -> Result<Self, SolverError> {
        let table = tsv::parse(contents)?;
        let signatures = table.header[1..]
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();

        let mut samples = HashMap::with_capacity(table.rows.len());
        for (line, cells) in &table.rows {
            let values = cells[1..]
                .iter()
                .map(|cell| {
                    cell.trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite() && *v >= 0.0)
                        .ok_or_else(|| StoreError::Parse {
                            line: *line,
                            message: format!("invalid exposure '{}'", cell.trim()),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let sample = cells[0].trim().to_string();
            if samples.contains_key(&sample) {
                return Err(StoreError::Parse {
                    line: *line,
                    message: format!("duplicate sample '{}'", sample),
                }
                .into());
            }
            samples.insert(sample, values);
        }

        Ok(Self {
            signatures,
            samples,
        })
    }

    /// Number of samples in the table
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl ExposureSolver for PrecomputedSolver {
    type Error = SolverError;

    fn exposures(
        &self,
        counts: &CountMatrix,
        signatures: &SignatureSet,
    ) -> Result<ExposureMatrix, Self::Error> {
        let columns = signatures
            .names()
            .iter()
            .map(|name| {
                self.signatures
                    .get(name)
                    .copied()
                    .ok_or_else(|| SolverError::UnknownSignature(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut matrix = ExposureMatrix::for_signatures(signatures);
        for sample in counts.samples() {
            let row = self
                .samples
                .get(sample.as_str())
                .ok_or_else(|| SolverError::UnknownSample(sample.to_string()))?;
            matrix.push_row(sample.clone(), columns.iter().map(|&c| row[c]).collect())?;
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigclust_domain::MutationType;

    const TABLE: &str = "Sample\tSBS1\tSBS2\tSBS5\nS1\t1\t2\t3\nS2\t4\t5\t6\n";

    fn counts(samples: &[&str]) -> CountMatrix {
        let mut counts = CountMatrix::new(vec!["C>A".to_string()]);
        for sample in samples {
            counts.push_row(*sample, vec![Some(1.0)]).unwrap();
        }
        counts
    }

    #[test]
    fn test_projects_requested_signature_order() {
        let solver = PrecomputedSolver::parse(TABLE).unwrap();
        let signatures = SignatureSet::new(MutationType::Sbs, ["SBS5", "SBS1"]).unwrap();

        let result = solver.exposures(&counts(&["S2", "S1"]), &signatures).unwrap();
        assert_eq!(result.signatures(), &["SBS5", "SBS1"]);
        assert_eq!(result.vectors(), vec![vec![6.0, 4.0], vec![3.0, 1.0]]);
        assert_eq!(solver.sample_count(), 2);
    }

    #[test]
    fn test_unknown_sample_and_signature() {
        let solver = PrecomputedSolver::parse(TABLE).unwrap();
        let known = SignatureSet::new(MutationType::Sbs, ["SBS1"]).unwrap();
        let unknown = SignatureSet::new(MutationType::Sbs, ["SBS40"]).unwrap();

        assert!(matches!(
            solver.exposures(&counts(&["S9"]), &known),
            Err(SolverError::UnknownSample(_))
        ));
        assert!(matches!(
            solver.exposures(&counts(&["S1"]), &unknown),
            Err(SolverError::UnknownSignature(_))
        ));
    }

    #[test]
    fn test_rejects_negative_exposure() {
        let result = PrecomputedSolver::parse("Sample\tSBS1\nS1\t-1\n");
        assert!(matches!(result, Err(SolverError::Load(_))));
    }

    #[test]
    fn test_rejects_duplicate_sample() {
        let result = PrecomputedSolver::parse("Sample\tSBS1\nS1\t1\nS2\t2\nS1\t3\n");
        assert!(matches!(
            result,
            Err(SolverError::Load(StoreError::Parse { line: 4, .. }))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("exposures.tsv");
        std::fs::write(&path, TABLE).unwrap();

        let solver = PrecomputedSolver::from_file(&path).unwrap();
        assert_eq!(solver.sample_count(), 2);
    }
}
