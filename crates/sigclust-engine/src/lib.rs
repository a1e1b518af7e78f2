//! Sigclust Engine
//!
//! Turns a clustering request (projects + ordered signature set) into a
//! labeled hierarchical tree of samples.
//!
//! # Pipeline
//!
//! 1. **Aggregate**: for each project, fetch counts, drop samples with missing
//!    values, decompose into exposures and append them in project order.
//!    Projects that cannot contribute are skipped and recorded in an
//!    [`AggregationReport`].
//! 2. **Cluster**: Ward linkage over the pooled exposure vectors.
//! 3. **Label**: name every node by the samples under it.
//!
//! The engine is generic over a [`CountSource`](sigclust_domain::CountSource)
//! and an [`ExposureSolver`](sigclust_domain::ExposureSolver).
//! [`ClusteringEngine::cluster_with_timeout`] runs a request on the blocking
//! pool and aborts it cooperatively when its time budget runs out.

#![warn(missing_docs)]

mod aggregator;
mod config;
mod engine;
mod error;
mod report;
mod request;

pub use aggregator::ExposureAggregator;
pub use config::EngineConfig;
pub use engine::ClusteringEngine;
pub use error::EngineError;
pub use report::{AggregationReport, ProjectOutcome, ProjectReport, SkipReason};
pub use request::{ClusteringOutcome, ClusteringRequest};
