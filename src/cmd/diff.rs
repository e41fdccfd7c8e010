//! Diff command implementation
//!
//! Handles the `shotdiff diff` command: compare every baseline/current
//! pair, write diff images and the results document.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::config::ConfigOverrides;
use crate::diff::ResultSet;
use crate::fmt::{format_percent, icon, CAMERA, CHECKMARK};
use crate::pipeline::{DiffEvent, Pipeline, PipelineConfig, ProgressObserver};

/// Progress bar over the (key, width) pairs
pub struct ProgressBarObserver {
    bar: ProgressBar,
}

impl ProgressBarObserver {
    /// A bar that stays hidden until comparison starts
    pub fn new() -> Self {
        let bar = ProgressBar::hidden();
        let template = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(template);
        Self { bar }
    }
}

impl Default for ProgressBarObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for ProgressBarObserver {
    fn observe(&self, event: DiffEvent<'_>) {
        match event {
            DiffEvent::Started { pairs } => {
                self.bar.set_length(pairs);
                self.bar
                    .set_draw_target(indicatif::ProgressDrawTarget::stderr());
            }
            DiffEvent::Compared(result) => {
                self.bar
                    .set_message(format!("{} @ {}px", result.key, result.width));
                self.bar.inc(1);
            }
            DiffEvent::Skipped(_) => self.bar.inc(1),
            DiffEvent::Finished => self.bar.finish_and_clear(),
        }
    }
}

/// Compare screenshots and persist results
///
/// # Examples
///
/// ```no_run
/// use shotdiff::cmd::diff::cmd_diff;
/// use shotdiff::config::ConfigOverrides;
/// use std::path::Path;
///
/// cmd_diff(Path::new("."), &ConfigOverrides::default())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_diff(root: &Path, overrides: &ConfigOverrides) -> Result<()> {
    let config = PipelineConfig::load(root, overrides)?;
    println!("{}{} Comparing screenshots", icon(&CAMERA), style("shotdiff").bold());
    println!();

    let pipeline = Pipeline::new(config);
    let results = pipeline.compare(&ProgressBarObserver::new())?;
    present_results(&results, pipeline.config());
    Ok(())
}

/// Print one line per compared pair, then where the results went
pub(crate) fn present_results(results: &ResultSet, config: &PipelineConfig) {
    if results.is_empty() {
        println!(
            "   {} Nothing to compare (no matching baseline/current pairs)",
            style("•").dim()
        );
    }
    for result in results {
        let percent = format_percent(result.mismatch_percent);
        let styled = if result.mismatch_percent > config.report.epsilon {
            style(percent).yellow()
        } else {
            style(percent).green()
        };
        println!(
            "   {} {} @ {}px {} {}",
            style("•").dim(),
            result.key,
            result.width,
            style("→").dim(),
            styled
        );
    }
    println!();
    println!(
        "{} Results written to {}",
        icon(&CHECKMARK),
        style(config.layout.results.display()).cyan()
    );
}
