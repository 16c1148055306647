//! Adapters - Implementations of port interfaces.
//!
//! - `fixtures` - Stored optimisation results (built in, YAML)

pub mod fixtures;

pub use fixtures::NotebookResultCatalog;
