//! Project metadata table (`meta.tsv`)

use crate::tsv;
use crate::StoreError;
use sigclust_domain::{MutationType, ProjectId};
use std::collections::HashMap;
use std::path::PathBuf;

/// File name of the metadata table inside the data directory
pub const META_FILE: &str = "meta.tsv";

const PROJECT_COLUMN: &str = "Project";
const HAS_COUNTS_COLUMN: &str = "Has Counts";

fn counts_column(mutation_type: MutationType) -> String {
    format!("Counts {} Path", mutation_type.as_str())
}

/// One project's metadata row
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    /// Project identifier
    pub id: ProjectId,
    /// Whether the project has count data at all
    pub has_counts: bool,
    /// Count file per mutation type, relative to the data directory
    pub counts_paths: HashMap<MutationType, PathBuf>,
}

impl ProjectRecord {
    /// Count file for `mutation_type`, if the project has usable counts of that type
    pub fn counts_path(&self, mutation_type: MutationType) -> Option<&PathBuf> {
        if !self.has_counts {
            return None;
        }
        self.counts_paths.get(&mutation_type)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

/// Parse `meta.tsv` contents into project records, in file order
///
/// The `Project` and `Has Counts` columns are required; the per-type path
/// columns are optional.
///
/// # Errors
/// Returns [`StoreError::MissingColumn`] or [`StoreError::Parse`] for malformed tables.
pub fn parse_metadata(contents: &str) -> Result<Vec<ProjectRecord>, StoreError> {
    let table = tsv::parse(contents)?;
    let project_col = table.require_column(PROJECT_COLUMN)?;
    let has_counts_col = table.require_column(HAS_COUNTS_COLUMN)?;

    let path_cols: Vec<(MutationType, usize)> =
        [MutationType::Sbs, MutationType::Dbs, MutationType::Indel]
            .into_iter()
            .filter_map(|mt| table.column(&counts_column(mt)).map(|col| (mt, col)))
            .collect();

    let mut records = Vec::with_capacity(table.rows.len());
    for (line, cells) in &table.rows {
        let id = cells[project_col].trim();
        if id.is_empty() {
            return Err(StoreError::Parse {
                line: *line,
                message: "empty project id".to_string(),
            });
        }

        let counts_paths = path_cols
            .iter()
            .filter_map(|(mt, col)| {
                let path = cells[*col].trim();
                (!path.is_empty()).then(|| (*mt, PathBuf::from(path)))
            })
            .collect();

        records.push(ProjectRecord {
            id: ProjectId::from(id),
            has_counts: parse_flag(&cells[has_counts_col]),
            counts_paths,
        });
    }

    Ok(records)
}
