//! Fixture Adapters
//!
//! Implementations of the StoredResultCatalog port.
//!
//! ## Available Adapters
//!
//! - **NotebookResultCatalog** - Recorded optimisation results, built in or loaded from YAML
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::fixtures::NotebookResultCatalog;
//!
//! // Recorded results shipped with the crate
//! let catalog = NotebookResultCatalog::builtin();
//!
//! // Replacement dataset
//! let catalog = NotebookResultCatalog::from_path("./data/results.yaml")?;
//! ```

mod notebook_catalog;

pub use notebook_catalog::NotebookResultCatalog;
