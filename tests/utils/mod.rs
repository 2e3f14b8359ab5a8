pub mod documents;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use documents::{batting_document, full_document, to_body};
#[allow(unused_imports)]
pub use mocks::{CountingSource, GatedSource, RecordingSink, Rendered};
#[allow(unused_imports)]
pub use setup::{serve_static, TestSetupBuilder};
