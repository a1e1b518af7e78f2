//! Per-request aggregation bookkeeping

use serde::{Deserialize, Serialize};
use sigclust_domain::{ProjectId, SampleId};
use std::fmt::Write;

/// Why a project contributed nothing to the aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The source has no counts for the project and mutation type
    NoCountData,
    /// Every sample had at least one missing count
    NoCompleteSamples {
        /// Rows discarded as incomplete
        dropped: usize,
    },
    /// The count source failed to read the project
    SourceFailure(String),
    /// The exposure solver rejected the project's counts
    DecompositionFailure(String),
}

/// Result of processing one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProjectOutcome {
    /// Rows were appended to the aggregate
    Contributed {
        /// Exposure rows appended
        rows: usize,
        /// Incomplete count rows discarded before decomposition
        dropped_incomplete: usize,
    },
    /// Nothing was appended
    Skipped {
        /// Why the project was skipped
        reason: SkipReason,
    },
}

/// Outcome of one project in request order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReport {
    /// Project identifier
    pub project: ProjectId,
    /// What happened to it
    pub outcome: ProjectOutcome,
}

/// Summary of an aggregation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationReport {
    /// One entry per requested project, in request order
    pub projects: Vec<ProjectReport>,
    /// Rows in the aggregate exposure table
    pub total_rows: usize,
    /// Sample ids that occur on more than one row of the aggregate
    pub duplicate_samples: Vec<SampleId>,
}

impl AggregationReport {
    pub(crate) fn contributed(&mut self, project: &ProjectId, rows: usize, dropped: usize) {
        self.total_rows += rows;
        self.projects.push(ProjectReport {
            project: project.clone(),
            outcome: ProjectOutcome::Contributed {
                rows,
                dropped_incomplete: dropped,
            },
        });
    }

    pub(crate) fn skipped(&mut self, project: &ProjectId, reason: SkipReason) {
        self.projects.push(ProjectReport {
            project: project.clone(),
            outcome: ProjectOutcome::Skipped { reason },
        });
    }

    /// Number of projects that contributed at least one row
    pub fn contributing_projects(&self) -> usize {
        self.projects
            .iter()
            .filter(|p| matches!(p.outcome, ProjectOutcome::Contributed { .. }))
            .count()
    }

    /// Projects that were skipped, with their reasons
    pub fn skipped_projects(&self) -> impl Iterator<Item = (&ProjectId, &SkipReason)> {
        self.projects.iter().filter_map(|p| match &p.outcome {
            ProjectOutcome::Skipped { reason } => Some((&p.project, reason)),
            ProjectOutcome::Contributed { .. } => None,
        })
    }

    /// Human-readable multi-line summary
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} samples from {}/{} projects",
            self.total_rows,
            self.contributing_projects(),
            self.projects.len()
        );
        for report in &self.projects {
            let line = match &report.outcome {
                ProjectOutcome::Contributed {
                    rows,
                    dropped_incomplete,
                } => format!(
                    "{}: {} samples ({} incomplete dropped)",
                    report.project, rows, dropped_incomplete
                ),
                ProjectOutcome::Skipped { reason } => {
                    format!("{}: skipped, {}", report.project, describe(reason))
                }
            };
            let _ = write!(out, "\n  {}", line);
        }
        if !self.duplicate_samples.is_empty() {
            let names: Vec<&str> = self.duplicate_samples.iter().map(|s| s.as_str()).collect();
            let _ = write!(out, "\n  duplicate samples: {}", names.join(", "));
        }
        out
    }
}

fn describe(reason: &SkipReason) -> String {
    match reason {
        SkipReason::NoCountData => "no count data".to_string(),
        SkipReason::NoCompleteSamples { dropped } => {
            format!("no complete samples ({} dropped)", dropped)
        }
        SkipReason::SourceFailure(msg) => format!("source failure: {}", msg),
        SkipReason::DecompositionFailure(msg) => format!("decomposition failure: {}", msg),
    }
}
