//! File-backed count source

use crate::counts::parse_counts;
use crate::metadata::{parse_metadata, ProjectRecord, META_FILE};
use crate::StoreError;
use sigclust_domain::traits::CountSource;
use sigclust_domain::{CountMatrix, MutationType, ProjectId, ProjectSummary};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Count source reading `meta.tsv` and per-project count files from a data directory
///
/// Metadata is loaded once when the store is opened; count files are read on
/// every request. The store never writes, so one instance can be shared
/// between threads.
///
/// # Examples
///
/// ```no_run
/// use sigclust_store::TsvCountStore;
///
/// let store = TsvCountStore::open("data").unwrap();
/// println!("{} projects", store.project_count());
/// ```
#[derive(Debug, Clone)]
pub struct TsvCountStore {
    data_dir: PathBuf,
    projects: Vec<ProjectRecord>,
    index: HashMap<ProjectId, usize>,
}

impl TsvCountStore {
    /// Open the data directory and load its metadata table
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if `meta.tsv` cannot be read, or a parse error.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let meta_path = data_dir.join(META_FILE);
        let contents = read_file(&meta_path)?;
        let projects = parse_metadata(&contents)?;
        debug!("Loaded {} project records from {}", projects.len(), meta_path.display());
        Ok(Self::from_records(data_dir, projects))
    }

    /// Build a store from already-parsed records
    pub fn from_records(data_dir: PathBuf, projects: Vec<ProjectRecord>) -> Self {
        let index = projects
            .iter()
            .enumerate()
            .map(|(i, record)| (record.id.clone(), i))
            .collect();
        Self {
            data_dir,
            projects,
            index,
        }
    }

    /// Data directory the store reads from
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Number of projects in the metadata table
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Metadata record of a project
    pub fn record(&self, project: &ProjectId) -> Option<&ProjectRecord> {
        self.index.get(project).map(|&i| &self.projects[i])
    }
}

fn read_file(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl CountSource for TsvCountStore {
    type Error = StoreError;

    fn counts(
        &self,
        project: &ProjectId,
        mutation_type: MutationType,
    ) -> Result<Option<CountMatrix>, Self::Error> {
        let Some(path) = self
            .record(project)
            .and_then(|record| record.counts_path(mutation_type))
        else {
            return Ok(None);
        };

        let full_path = self.data_dir.join(path);
        let matrix = parse_counts(&read_file(&full_path)?)?;
        debug!(
            "Read {} {} count rows for project {}",
            matrix.len(),
            mutation_type,
            project
        );
        Ok(Some(matrix))
    }

    fn projects(&self) -> Result<Vec<ProjectSummary>, Self::Error> {
        Ok(self
            .projects
            .iter()
            .map(|record| ProjectSummary {
                id: record.id.clone(),
                has_counts: record.has_counts,
            })
            .collect())
    }
}
