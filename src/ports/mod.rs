//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `StoredResultCatalog` - Lookup of precomputed scenario results

mod stored_results;

pub use stored_results::{ScenarioKey, StaticResult, StoredResultCatalog, StoredResultError};
