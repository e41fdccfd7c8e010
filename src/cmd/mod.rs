//! Command handlers for the shotdiff CLI
//!
//! Each submodule handles one CLI command; presentation lives here, the
//! work itself in [`crate::pipeline`] and [`crate::report`].

pub mod comment;
pub mod completions;
pub mod diff;
pub mod init;
pub mod latest;
pub mod report;
pub mod run;

// Re-export command functions for convenient access
pub use comment::cmd_comment;
pub use completions::cmd_completions;
pub use diff::{cmd_diff, ProgressBarObserver};
pub use init::cmd_init;
pub use latest::cmd_latest;
pub use report::cmd_report;
pub use run::cmd_run;
