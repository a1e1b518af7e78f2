//! Request and outcome types

use serde::Serialize;
use sigclust_cluster::LabeledTree;
use sigclust_domain::{MutationType, ProjectId, SampleId, SignatureSet};

use crate::{AggregationReport, EngineError};

/// One clustering request: which projects to pool, over which signatures
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringRequest {
    /// Projects in request order
    pub projects: Vec<ProjectId>,
    /// Ordered signature set; also fixes the mutation type
    pub signatures: SignatureSet,
}

impl ClusteringRequest {
    /// Create a request from validated parts
    pub fn new(projects: Vec<ProjectId>, signatures: SignatureSet) -> Self {
        Self {
            projects,
            signatures,
        }
    }

    /// Build a request from raw strings
    ///
    /// `mut_type` defaults to SBS when absent. Signature names must be
    /// non-empty and unique; project ids must not be blank.
    pub fn parse<P, S>(
        projects: P,
        signatures: S,
        mut_type: Option<&str>,
    ) -> Result<Self, EngineError>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let mutation_type = match mut_type {
            Some(raw) => MutationType::parse(raw).ok_or_else(|| {
                EngineError::InvalidRequest(format!("unknown mutation type: {}", raw))
            })?,
            None => MutationType::default(),
        };

        let signatures = SignatureSet::new(mutation_type, signatures)
            .map_err(|e| EngineError::InvalidRequest(e.to_string()))?;

        let projects = projects
            .into_iter()
            .map(|p| {
                let p: String = p.into();
                if p.trim().is_empty() {
                    Err(EngineError::InvalidRequest(
                        "project ids must not be blank".to_string(),
                    ))
                } else {
                    Ok(ProjectId::new(p))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(projects, signatures))
    }

    /// Mutation type of the request
    pub fn mutation_type(&self) -> MutationType {
        self.signatures.mutation_type()
    }
}

/// Result of a successful clustering request
#[derive(Debug, Clone, Serialize)]
pub struct ClusteringOutcome {
    /// Labeled tree rooted at the synthetic `"root"` node
    pub tree: LabeledTree,
    /// Samples in aggregation order (leaf `i` is `samples[i]`)
    pub samples: Vec<SampleId>,
    /// Per-project bookkeeping
    pub report: AggregationReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_sbs() {
        let request = ClusteringRequest::parse(["P1"], ["SBS1", "SBS5"], None).unwrap();
        assert_eq!(request.mutation_type(), MutationType::Sbs);
        assert_eq!(request.projects, vec![ProjectId::from("P1")]);
        assert_eq!(request.signatures.names(), &["SBS1", "SBS5"]);
    }

    #[test]
    fn test_parse_mutation_type() {
        let request = ClusteringRequest::parse(["P1"], ["DBS2"], Some("dbs")).unwrap();
        assert_eq!(request.mutation_type(), MutationType::Dbs);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        let err = ClusteringRequest::parse(["P1"], ["SBS1"], Some("XYZ")).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequest(_)));

        let err = ClusteringRequest::parse(["P1"], Vec::<String>::new(), None).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequest(_)));

        let err = ClusteringRequest::parse(["P1"], ["SBS1", "SBS1"], None).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequest(_)));

        let err = ClusteringRequest::parse(["  "], ["SBS1"], None).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequest(_)));
    }

    #[test]
    fn test_parse_allows_empty_project_list() {
        let request = ClusteringRequest::parse(Vec::<String>::new(), ["SBS1"], None).unwrap();
        assert!(request.projects.is_empty());
    }
}
