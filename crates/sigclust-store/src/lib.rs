//! Sigclust Storage Layer
//!
//! Implements the `CountSource` trait over a directory of tab-separated files.
//!
//! # Layout
//!
//! ```text
//! data/
//! ├── meta.tsv              one row per project
//! └── counts/
//!     ├── PROJ-A.sbs.tsv    samples × categories
//!     └── PROJ-B.sbs.tsv
//! ```
//!
//! `meta.tsv` carries the columns `Project`, `Has Counts`, `Counts SBS Path`,
//! `Counts DBS Path` and `Counts INDEL Path`. Paths are relative to the data
//! directory; an empty path means the project has no counts of that type.
//!
//! Count files have a header row (first cell names the sample column, the
//! rest are categories) followed by one row per sample. Empty cells and
//! `NA` / `NaN` / `null` are missing values.
//!
//! # Examples
//!
//! ```no_run
//! use sigclust_domain::traits::CountSource;
//! use sigclust_domain::{MutationType, ProjectId};
//! use sigclust_store::TsvCountStore;
//!
//! let store = TsvCountStore::open("data").unwrap();
//! let counts = store.counts(&ProjectId::from("PCAWG-BRCA-EU"), MutationType::Sbs).unwrap();
//! ```

#![warn(missing_docs)]

mod counts;
mod memory;
mod metadata;
mod store;
pub mod tsv;

use std::path::PathBuf;
use thiserror::Error;

pub use counts::parse_counts;
pub use memory::MemoryCountSource;
pub use metadata::{parse_metadata, ProjectRecord, META_FILE};
pub use store::TsvCountStore;

/// Errors that can occur while reading count data
#[derive(Error, Debug)]
pub enum StoreError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed table contents
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Required column missing from a header
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Source temporarily unable to serve a project
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// Domain validation error while building a matrix
    #[error("Invalid data: {0}")]
    InvalidData(#[from] sigclust_domain::DomainError),
}
