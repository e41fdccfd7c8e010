//! Comparison pipeline orchestration
//!
//! Implements the complete visual regression pass:
//! 1. Reconcile and diff every baseline/current screenshot pair
//! 2. Persist the results document and one diff image per pair
//! 3. Classify keys, render the HTML report and summary document
//! 4. Rotate old timestamped reports

pub mod config;
pub mod executor;
pub mod telemetry;

pub use config::PipelineConfig;
pub use executor::Pipeline;
pub use telemetry::{DiffEvent, MemoryObserver, NoOpObserver, ProgressObserver, RecordedEvent};
