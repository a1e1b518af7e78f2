//! Signature sets and mutation types

use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Class of mutation a signature set and count table describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MutationType {
    /// Single base substitutions
    #[default]
    #[serde(rename = "SBS")]
    Sbs,

    /// Doublet base substitutions
    #[serde(rename = "DBS")]
    Dbs,

    /// Small insertions and deletions
    #[serde(rename = "INDEL")]
    Indel,
}

impl MutationType {
    /// Get the canonical tag (`SBS`, `DBS`, `INDEL`)
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationType::Sbs => "SBS",
            MutationType::Dbs => "DBS",
            MutationType::Indel => "INDEL",
        }
    }

    /// Parse a tag, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "SBS" => Some(MutationType::Sbs),
            "DBS" => Some(MutationType::Dbs),
            "INDEL" => Some(MutationType::Indel),
            _ => None,
        }
    }
}

impl fmt::Display for MutationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MutationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::InvalidMutationType(s.to_string()))
    }
}

/// The caller-chosen, ordered list of signatures to decompose into
///
/// The order of `names` fixes the column order of every exposure matrix
/// produced for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureSet {
    mutation_type: MutationType,
    names: Vec<String>,
}

impl SignatureSet {
    /// Create a validated signature set
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidSignatureSet`] if the list is empty,
    /// contains a blank name, or repeats a name.
    pub fn new<I, S>(mutation_type: MutationType, names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.is_empty() {
            return Err(DomainError::InvalidSignatureSet(
                "at least one signature is required".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.trim().is_empty() {
                return Err(DomainError::InvalidSignatureSet(
                    "signature names cannot be blank".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(DomainError::InvalidSignatureSet(format!(
                    "duplicate signature '{}'",
                    name
                )));
            }
        }

        Ok(Self {
            mutation_type,
            names,
        })
    }

    /// Mutation type the signatures belong to
    pub fn mutation_type(&self) -> MutationType {
        self.mutation_type
    }

    /// Signature names in requested order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of signatures (the dimension of every exposure vector)
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a validated set; provided for API symmetry
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_type_parse() {
        assert_eq!(MutationType::parse("sbs"), Some(MutationType::Sbs));
        assert_eq!(MutationType::parse("DBS"), Some(MutationType::Dbs));
        assert_eq!(MutationType::parse(" Indel "), Some(MutationType::Indel));
        assert_eq!(MutationType::parse("SV"), None);
        assert!("cnv".parse::<MutationType>().is_err());
    }

    #[test]
    fn test_mutation_type_default_is_sbs() {
        assert_eq!(MutationType::default(), MutationType::Sbs);
        assert_eq!(MutationType::default().to_string(), "SBS");
    }

    #[test]
    fn test_signature_set_preserves_order() {
        let set = SignatureSet::new(MutationType::Sbs, ["COSMIC 3", "COSMIC 1", "COSMIC 2"]).unwrap();
        assert_eq!(set.names(), &["COSMIC 3", "COSMIC 1", "COSMIC 2"]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.mutation_type(), MutationType::Sbs);
    }

    #[test]
    fn test_signature_set_rejects_empty() {
        let result = SignatureSet::new(MutationType::Sbs, Vec::<String>::new());
        assert!(matches!(result, Err(DomainError::InvalidSignatureSet(_))));
    }

    #[test]
    fn test_signature_set_rejects_duplicates_and_blanks() {
        assert!(SignatureSet::new(MutationType::Sbs, ["COSMIC 1", "COSMIC 1"]).is_err());
        assert!(SignatureSet::new(MutationType::Dbs, ["DBS1", "  "]).is_err());
    }
}
