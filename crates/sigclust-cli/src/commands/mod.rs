//! Command implementations.

pub mod cluster;
pub mod projects;

pub use self::cluster::{execute_cluster, run_cluster};
pub use self::projects::execute_projects;
