pub mod record_builders;
pub mod sources;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use record_builders::{sample_history, RecordBuilder};
#[allow(unused_imports)]
pub use sources::{FailingRecordSource, GatedRecordSource};
