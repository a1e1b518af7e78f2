//! Minimal tab-separated table reader
//!
//! Splits on tabs only; quoting is not supported. Blank lines are skipped and
//! trailing `\r` is stripped so files written on Windows read the same.

use crate::StoreError;

/// A parsed table: header cells plus data rows with their line numbers
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Header cells
    pub header: Vec<String>,
    /// `(line number, cells)` for each data row
    pub rows: Vec<(usize, Vec<String>)>,
}

impl Table {
    /// Position of a header column, matched case-insensitively after trimming
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header
            .iter()
            .position(|cell| cell.trim().eq_ignore_ascii_case(name))
    }

    /// Position of a required header column
    pub fn require_column(&self, name: &str) -> Result<usize, StoreError> {
        self.column(name)
            .ok_or_else(|| StoreError::MissingColumn(name.to_string()))
    }
}

/// Parse tab-separated `contents`; the first non-blank line is the header
///
/// # Errors
/// Returns [`StoreError::Parse`] when the input has no header or a row has a
/// different number of cells than the header.
pub fn parse(contents: &str) -> Result<Table, StoreError> {
    let mut lines = contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or_else(|| StoreError::Parse {
        line: 1,
        message: "missing header row".to_string(),
    })?;
    let header: Vec<String> = header_line.split('\t').map(str::to_string).collect();

    let mut rows = Vec::new();
    for (line, text) in lines {
        let cells: Vec<String> = text.split('\t').map(str::to_string).collect();
        if cells.len() != header.len() {
            return Err(StoreError::Parse {
                line,
                message: format!("expected {} cells, found {}", header.len(), cells.len()),
            });
        }
        rows.push((line, cells));
    }

    Ok(Table { header, rows })
}
