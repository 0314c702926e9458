//! Ontologize Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared pieces used by every ontologize workspace member:
//!
//! - **Logging**: `tracing` subscriber setup driven by environment variables
//! - **Files**: the catalogue of source data files (ontology, associations, jar)
//! - **Errors**: the shared error type for catalogue lookups
//!
//! # Example
//!
//! ```no_run
//! use ontologize_common::files::DataFiles;
//!
//! let files = DataFiles::new("./data");
//! let association = files.association("dmelanogaster").unwrap();
//! println!("{}", association.display());
//! ```

pub mod error;
pub mod files;
pub mod logging;

// Re-export commonly used types
pub use error::{CommonError, Result};
pub use files::{DataFiles, Organism};
