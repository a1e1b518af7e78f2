//! Sample and project identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a single sequenced sample
///
/// Sample ids are opaque strings. They are unique within one project but
/// may collide across projects; nothing here deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleId(String);

impl SampleId {
    /// Create a sample id
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id, returning the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SampleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SampleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifier of a project (cohort) holding samples
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Create a project id
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_id_display() {
        let id = SampleId::from("TCGA-AN-A046");
        assert_eq!(id.to_string(), "TCGA-AN-A046");
        assert_eq!(id.as_str(), "TCGA-AN-A046");
    }

    #[test]
    fn test_sample_id_ordering_is_lexicographic() {
        let mut ids = vec![SampleId::from("S2"), SampleId::from("S10"), SampleId::from("S1")];
        ids.sort();
        let names: Vec<_> = ids.iter().map(SampleId::as_str).collect();
        assert_eq!(names, vec!["S1", "S10", "S2"]);
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&ProjectId::from("PCAWG-BRCA")).unwrap();
        assert_eq!(json, "\"PCAWG-BRCA\"");

        let parsed: SampleId = serde_json::from_str("\"S1\"").unwrap();
        assert_eq!(parsed, SampleId::from("S1"));
    }
}
