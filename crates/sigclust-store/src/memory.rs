//! In-memory count source, mainly for tests and embedding

use crate::StoreError;
use sigclust_domain::traits::CountSource;
use sigclust_domain::{CountMatrix, MutationType, ProjectId, ProjectSummary};
use std::collections::{HashMap, HashSet};

/// Count source holding count matrices in memory
///
/// Projects keep their insertion order in [`CountSource::projects`].
///
/// # Examples
///
/// ```
/// use sigclust_domain::traits::CountSource;
/// use sigclust_domain::{CountMatrix, MutationType, ProjectId};
/// use sigclust_store::MemoryCountSource;
///
/// let mut source = MemoryCountSource::new();
/// source.insert("PROJ-A", MutationType::Sbs, CountMatrix::new(vec!["C>A".to_string()]));
/// source.insert_without_counts("PROJ-B");
///
/// assert!(source.counts(&ProjectId::from("PROJ-A"), MutationType::Sbs).unwrap().is_some());
/// assert!(source.counts(&ProjectId::from("PROJ-B"), MutationType::Sbs).unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCountSource {
    order: Vec<ProjectId>,
    counts: HashMap<(ProjectId, MutationType), CountMatrix>,
    failures: HashSet<ProjectId>,
}

impl MemoryCountSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, project: &ProjectId) {
        if !self.order.contains(project) {
            self.order.push(project.clone());
        }
    }

    /// Add (or replace) a project's counts for one mutation type
    pub fn insert(
        &mut self,
        project: impl Into<ProjectId>,
        mutation_type: MutationType,
        counts: CountMatrix,
    ) {
        let project = project.into();
        self.register(&project);
        self.counts.insert((project, mutation_type), counts);
    }

    /// Register a project that has no count data
    pub fn insert_without_counts(&mut self, project: impl Into<ProjectId>) {
        let project = project.into();
        self.register(&project);
    }

    /// Make every read of `project` fail with [`StoreError::Unavailable`]
    pub fn add_failure(&mut self, project: impl Into<ProjectId>) {
        let project = project.into();
        self.register(&project);
        self.failures.insert(project);
    }
}

impl CountSource for MemoryCountSource {
    type Error = StoreError;

    fn counts(
        &self,
        project: &ProjectId,
        mutation_type: MutationType,
    ) -> Result<Option<CountMatrix>, Self::Error> {
        if self.failures.contains(project) {
            return Err(StoreError::Unavailable(format!(
                "project '{}' cannot be read",
                project
            )));
        }
        Ok(self.counts.get(&(project.clone(), mutation_type)).cloned())
    }

    fn projects(&self) -> Result<Vec<ProjectSummary>, Self::Error> {
        Ok(self
            .order
            .iter()
            .map(|id| ProjectSummary {
                id: id.clone(),
                has_counts: self.counts.keys().any(|(p, _)| p == id),
            })
            .collect())
    }
}
