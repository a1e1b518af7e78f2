//! Sigclust Domain Layer
//!
//! Core value types and collaborator interfaces for clustering samples by
//! their mutational-signature exposures. Nothing in this crate performs I/O;
//! the storage and decomposition layers implement the traits defined here.
//!
//! ## Key Concepts
//!
//! - **Sample / Project**: string identifiers for sequenced samples and the cohorts that hold them
//! - **Signature set**: the caller-chosen, ordered list of signatures plus a mutation type
//! - **Count matrix**: per-sample mutation counts over categories, possibly with missing values
//! - **Exposure matrix**: per-sample non-negative signature weights, the clustering input
//!
//! ## Architecture
//!
//! - Pure data types and validation only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for the count source and the exposure solver
//!
//! ## Example
//!
//! ```
//! use sigclust_domain::{CountMatrix, CountSource, MutationType, ProjectId, ProjectSummary};
//!
//! struct Empty;
//!
//! impl CountSource for Empty {
//!     type Error = String;
//!
//!     fn counts(&self, _: &ProjectId, _: MutationType) -> Result<Option<CountMatrix>, String> {
//!         Ok(None)
//!     }
//!
//!     fn projects(&self) -> Result<Vec<ProjectSummary>, String> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! assert!(Empty.counts(&ProjectId::from("P1"), MutationType::Sbs).unwrap().is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ids;
pub mod matrix;
pub mod project;
pub mod signature;
pub mod traits;

// Re-exports for convenience
pub use error::DomainError;
pub use ids::{ProjectId, SampleId};
pub use matrix::{CountMatrix, ExposureMatrix};
pub use project::ProjectSummary;
pub use signature::{MutationType, SignatureSet};
pub use traits::{CountSource, ExposureSolver};
