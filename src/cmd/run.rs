//! Run command implementation
//!
//! Handles `shotdiff run`, the CI entry point: compare every pair, then
//! build the report from the results just written.

use anyhow::Result;
use console::style;
use std::path::Path;

use super::diff::ProgressBarObserver;
use super::report::{present_json, present_outcome};
use crate::config::ConfigOverrides;
use crate::fmt::{icon, CAMERA};
use crate::pipeline::{Pipeline, PipelineConfig};
use crate::report::SystemClock;

/// Compare and report in one pass
///
/// Differences never make this fail; only configuration and data errors
/// do.
///
/// # Examples
///
/// ```no_run
/// use shotdiff::cmd::run::cmd_run;
/// use shotdiff::config::ConfigOverrides;
/// use std::path::Path;
///
/// cmd_run(Path::new("."), &ConfigOverrides::default(), false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_run(root: &Path, overrides: &ConfigOverrides, json: bool) -> Result<()> {
    let config = PipelineConfig::load(root, overrides)?;
    let pipeline = Pipeline::new(config);

    if json {
        let outcome = pipeline.run()?;
        return present_json(&outcome);
    }

    println!(
        "{}{} Visual regression run ({} width(s))",
        icon(&CAMERA),
        style("shotdiff").bold(),
        pipeline.config().widths.len()
    );
    println!();

    let outcome = pipeline.run_with(&ProgressBarObserver::new(), &SystemClock)?;
    present_outcome(&outcome);
    Ok(())
}
