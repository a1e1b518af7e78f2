//! Project listing metadata

use crate::ProjectId;
use serde::{Deserialize, Serialize};

/// Summary of one project known to a count source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project identifier
    pub id: ProjectId,

    /// Whether the project has any mutation-count data
    pub has_counts: bool,
}
