//! Count table parsing

use crate::tsv;
use crate::StoreError;
use sigclust_domain::CountMatrix;

const MISSING_MARKERS: [&str; 4] = ["na", "nan", "null", "none"];

/// Parse a samples × categories count table
///
/// The first column holds sample ids; every other column is a category.
/// Missing cells become `None`.
///
/// # Errors
/// Returns [`StoreError::Parse`] for malformed rows, non-numeric cells or
/// non-finite values such as `inf`.
pub fn parse_counts(contents: &str) -> Result<CountMatrix, StoreError> {
    let table = tsv::parse(contents)?;
    if table.header.len() < 2 {
        return Err(StoreError::Parse {
            line: 1,
            message: "count table needs a sample column and at least one category".to_string(),
        });
    }

    let categories: Vec<String> = table.header[1..]
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    let mut matrix = CountMatrix::new(categories);

    for (line, cells) in &table.rows {
        let sample = cells[0].trim();
        if sample.is_empty() {
            return Err(StoreError::Parse {
                line: *line,
                message: "empty sample id".to_string(),
            });
        }
        let values = cells[1..]
            .iter()
            .map(|cell| parse_cell(cell, *line))
            .collect::<Result<Vec<_>, _>>()?;
        matrix.push_row(sample, values)?;
    }

    Ok(matrix)
}

fn parse_cell(cell: &str, line: usize) -> Result<Option<f64>, StoreError> {
    let cell = cell.trim();
    if cell.is_empty() || MISSING_MARKERS.iter().any(|m| cell.eq_ignore_ascii_case(m)) {
        return Ok(None);
    }
    let value: f64 = cell.parse().map_err(|_| StoreError::Parse {
        line,
        message: format!("invalid count '{}'", cell),
    })?;
    if !value.is_finite() {
        return Err(StoreError::Parse {
            line,
            message: format!("non-finite count '{}'", cell),
        });
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_counts() {
        let contents = "Sample\tA[C>A]A\tA[C>G]A\nS1\t3\t0\nS2\t1.5\t7\n";
        let matrix = parse_counts(contents).unwrap();
        assert_eq!(matrix.categories(), &["A[C>A]A", "A[C>G]A"]);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.rows()[1].1, vec![Some(1.5), Some(7.0)]);
    }

    #[test]
    fn test_missing_markers() {
        let contents = "Sample\tA\tB\tC\tD\nS1\t\tNA\tnan\tnull\n";
        let matrix = parse_counts(contents).unwrap();
        assert_eq!(matrix.rows()[0].1, vec![None, None, None, None]);
    }

    #[test]
    fn test_invalid_cell() {
        let result = parse_counts("Sample\tA\nS1\tlots\n");
        assert!(matches!(result, Err(StoreError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_non_finite_cell_is_rejected() {
        for cell in ["inf", "-inf", "Infinity"] {
            let contents = format!("Sample\tA\nS1\t{}\nS2\t1\n", cell);
            let result = parse_counts(&contents);
            assert!(
                matches!(result, Err(StoreError::Parse { line: 2, .. })),
                "cell: {}",
                cell
            );
        }
    }

    #[test]
    fn test_needs_categories() {
        assert!(parse_counts("Sample\nS1\n").is_err());
    }
}
