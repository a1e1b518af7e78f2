//! Sample-keyed count and exposure tables
//!
//! Both tables keep rows in insertion order and key them by [`SampleId`].
//! Keys are not required to be unique: concatenating cohorts may legitimately
//! produce the same sample id twice, and downstream clustering works by row
//! position rather than by key.

use crate::{DomainError, SampleId, SignatureSet};
use std::collections::BTreeMap;

/// Per-sample mutation counts over an ordered set of categories
///
/// A `None` cell is a missing count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CountMatrix {
    categories: Vec<String>,
    rows: Vec<(SampleId, Vec<Option<f64>>)>,
}

impl CountMatrix {
    /// Create an empty matrix over the given categories
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            categories,
            rows: Vec::new(),
        }
    }

    /// Append a row
    ///
    /// # Errors
    /// Returns [`DomainError::RowLength`] if `values` does not have one cell per category.
    pub fn push_row(
        &mut self,
        sample: impl Into<SampleId>,
        values: Vec<Option<f64>>,
    ) -> Result<(), DomainError> {
        let sample = sample.into();
        if values.len() != self.categories.len() {
            return Err(DomainError::RowLength {
                sample: sample.into_inner(),
                expected: self.categories.len(),
                found: values.len(),
            });
        }
        self.rows.push((sample, values));
        Ok(())
    }

    /// Category (column) names
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Rows in source order
    pub fn rows(&self) -> &[(SampleId, Vec<Option<f64>>)] {
        &self.rows
    }

    /// Sample ids in source order
    pub fn samples(&self) -> impl Iterator<Item = &SampleId> {
        self.rows.iter().map(|(sample, _)| sample)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Remove every sample that has a missing value in any category
    ///
    /// Returns the complete-only matrix and the number of rows dropped.
    pub fn drop_incomplete(self) -> (CountMatrix, usize) {
        let before = self.rows.len();
        let rows: Vec<_> = self
            .rows
            .into_iter()
            .filter(|(_, values)| values.iter().all(Option::is_some))
            .collect();
        let dropped = before - rows.len();

        (
            CountMatrix {
                categories: self.categories,
                rows,
            },
            dropped,
        )
    }
}

/// Per-sample signature exposures over an ordered set of signatures
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExposureMatrix {
    signatures: Vec<String>,
    rows: Vec<(SampleId, Vec<f64>)>,
}

impl ExposureMatrix {
    /// Create an empty matrix over the given signature columns
    pub fn new(signatures: Vec<String>) -> Self {
        Self {
            signatures,
            rows: Vec::new(),
        }
    }

    /// Create an empty matrix whose columns follow a signature set
    pub fn for_signatures(signatures: &SignatureSet) -> Self {
        Self::new(signatures.names().to_vec())
    }

    /// Append a row
    ///
    /// # Errors
    /// Returns [`DomainError::RowLength`] on a length mismatch and
    /// [`DomainError::InvalidExposure`] for negative or non-finite values.
    pub fn push_row(
        &mut self,
        sample: impl Into<SampleId>,
        values: Vec<f64>,
    ) -> Result<(), DomainError> {
        let sample = sample.into();
        if values.len() != self.signatures.len() {
            return Err(DomainError::RowLength {
                sample: sample.into_inner(),
                expected: self.signatures.len(),
                found: values.len(),
            });
        }
        if let Some((column, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(DomainError::InvalidExposure {
                sample: sample.into_inner(),
                column: self.signatures[column].clone(),
                value: *value,
            });
        }
        self.rows.push((sample, values));
        Ok(())
    }

    /// Concatenate another matrix's rows after this one's
    ///
    /// Duplicate sample ids are kept as separate rows.
    ///
    /// # Errors
    /// Returns [`DomainError::ColumnMismatch`] unless both matrices have the
    /// same signature columns in the same order.
    pub fn append(&mut self, other: ExposureMatrix) -> Result<(), DomainError> {
        if self.signatures != other.signatures {
            return Err(DomainError::ColumnMismatch {
                expected: self.signatures.join(", "),
                found: other.signatures.join(", "),
            });
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    /// Signature (column) names
    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }

    /// Rows in insertion order
    pub fn rows(&self) -> &[(SampleId, Vec<f64>)] {
        &self.rows
    }

    /// Sample ids in row order
    pub fn samples(&self) -> Vec<SampleId> {
        self.rows.iter().map(|(sample, _)| sample.clone()).collect()
    }

    /// Exposure vectors in row order
    pub fn vectors(&self) -> Vec<Vec<f64>> {
        self.rows.iter().map(|(_, values)| values.clone()).collect()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sample ids that occur on more than one row, sorted, each listed once
    pub fn duplicate_samples(&self) -> Vec<SampleId> {
        let mut counts: BTreeMap<&SampleId, usize> = BTreeMap::new();
        for (sample, _) in &self.rows {
            *counts.entry(sample).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(sample, _)| sample.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MutationType;

    fn categories() -> Vec<String> {
        vec!["A[C>A]A".to_string(), "A[C>G]A".to_string()]
    }

    #[test]
    fn test_count_row_length_checked() {
        let mut counts = CountMatrix::new(categories());
        let result = counts.push_row("S1", vec![Some(1.0)]);
        assert!(matches!(
            result,
            Err(DomainError::RowLength { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_drop_incomplete() {
        let mut counts = CountMatrix::new(categories());
        counts.push_row("S1", vec![Some(1.0), Some(2.0)]).unwrap();
        counts.push_row("S2", vec![None, Some(2.0)]).unwrap();
        counts.push_row("S3", vec![Some(0.0), Some(0.0)]).unwrap();

        let (complete, dropped) = counts.drop_incomplete();
        assert_eq!(dropped, 1);
        let samples: Vec<_> = complete.samples().map(SampleId::as_str).collect();
        assert_eq!(samples, vec!["S1", "S3"]);
    }

    #[test]
    fn test_drop_incomplete_all_missing() {
        let mut counts = CountMatrix::new(categories());
        counts.push_row("S1", vec![None, None]).unwrap();
        let (complete, dropped) = counts.drop_incomplete();
        assert!(complete.is_empty());
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_exposure_rejects_negative_and_nan() {
        let mut exposures = ExposureMatrix::new(vec!["SBS1".to_string()]);
        assert!(matches!(
            exposures.push_row("S1", vec![-0.5]),
            Err(DomainError::InvalidExposure { .. })
        ));
        assert!(exposures.push_row("S1", vec![f64::NAN]).is_err());
        assert!(exposures.push_row("S1", vec![0.0]).is_ok());
    }

    #[test]
    fn test_append_keeps_duplicates_in_order() {
        let set = SignatureSet::new(MutationType::Sbs, ["SBS1", "SBS5"]).unwrap();
        let mut first = ExposureMatrix::for_signatures(&set);
        first.push_row("S1", vec![1.0, 2.0]).unwrap();
        first.push_row("S2", vec![3.0, 4.0]).unwrap();

        let mut second = ExposureMatrix::for_signatures(&set);
        second.push_row("S1", vec![5.0, 6.0]).unwrap();

        first.append(second).unwrap();
        assert_eq!(first.len(), 3);
        let samples: Vec<_> = first.samples().into_iter().map(SampleId::into_inner).collect();
        assert_eq!(samples, vec!["S1", "S2", "S1"]);
        assert_eq!(first.duplicate_samples(), vec![SampleId::from("S1")]);
        assert_eq!(first.vectors()[2], vec![5.0, 6.0]);
    }

    #[test]
    fn test_append_rejects_reordered_columns() {
        let mut first = ExposureMatrix::new(vec!["SBS1".to_string(), "SBS5".to_string()]);
        let second = ExposureMatrix::new(vec!["SBS5".to_string(), "SBS1".to_string()]);
        assert!(matches!(
            first.append(second),
            Err(DomainError::ColumnMismatch { .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Rows of two optional counts, sample ids drawn from a small pool so keys repeat
    fn count_rows() -> impl Strategy<Value = Vec<(u8, Vec<Option<f64>>)>> {
        prop::collection::vec(
            (0u8..6, prop::collection::vec(prop::option::of(0.0f64..1e6), 2)),
            0..40,
        )
    }

    fn exposure_rows() -> impl Strategy<Value = Vec<(u8, Vec<f64>)>> {
        prop::collection::vec((0u8..6, prop::collection::vec(0.0f64..1e3, 2)), 0..20)
    }

    fn exposures(rows: &[(u8, Vec<f64>)]) -> ExposureMatrix {
        let mut matrix = ExposureMatrix::new(vec!["SBS1".to_string(), "SBS5".to_string()]);
        for (sample, values) in rows {
            matrix.push_row(format!("S{}", sample), values.clone()).unwrap();
        }
        matrix
    }

    proptest! {
        /// Property: dropping incomplete rows keeps exactly the all-present rows, in order
        #[test]
        fn test_drop_incomplete_partitions_rows(rows in count_rows()) {
            let mut counts = CountMatrix::new(vec!["C>A".to_string(), "C>T".to_string()]);
            for (sample, values) in &rows {
                counts.push_row(format!("S{}", sample), values.clone()).unwrap();
            }

            let (complete, dropped) = counts.drop_incomplete();

            prop_assert_eq!(complete.len() + dropped, rows.len());
            prop_assert!(complete.rows().iter().all(|(_, v)| v.iter().all(Option::is_some)));

            let expected: Vec<_> = rows
                .iter()
                .filter(|(_, v)| v.iter().all(Option::is_some))
                .map(|(s, v)| (SampleId::new(format!("S{}", s)), v.clone()))
                .collect();
            prop_assert_eq!(complete.rows(), expected.as_slice());
        }

        /// Property: append is row concatenation, duplicate keys included
        #[test]
        fn test_append_concatenates(first in exposure_rows(), second in exposure_rows()) {
            let mut combined = exposures(&first);
            combined.append(exposures(&second)).unwrap();

            let all: Vec<_> = first.iter().chain(second.iter()).cloned().collect();
            prop_assert_eq!(combined.len(), all.len());
            let expected_all = exposures(&all);
            prop_assert_eq!(combined.rows(), expected_all.rows());

            let mut keys = combined.samples();
            let total = keys.len();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(combined.duplicate_samples().is_empty(), keys.len() == total);
        }
    }
}
