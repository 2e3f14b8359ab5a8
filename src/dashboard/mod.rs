// Public API - what other modules can use
pub use controller::DashboardController;
pub use errors::{DashboardError, SourceError};
pub use navigator::{NavigationOutcome, Navigator};
pub use source::{Catalog, DocumentSource, FsDocumentSource, HttpDocumentSource, InMemoryDocumentSource};
pub use types::{DashboardPage, UsageKey};

// Internal modules
mod controller;
mod errors;
mod navigator;
pub mod source;
mod types;
