//! Comparison pipeline executor
//!
//! Runs the two stages over one project:
//! 1. compare: reconcile + diff every baseline/current pair, persist results
//! 2. report: classify, render HTML and summary, rotate old reports

use anyhow::Result;
use log::info;

use super::config::PipelineConfig;
use super::telemetry::{NoOpObserver, ProgressObserver};
use crate::diff::{Aggregator, ResultSet};
use crate::infra::{FileSystem, RealFileSystem};
use crate::report::{Clock, ReportOutcome, ReportWriter, SystemClock};

/// Main comparison pipeline
///
/// Stages are independent: `report` only reads the persisted results
/// document, so it can run after a `compare` from an earlier process.
pub struct Pipeline<FS: FileSystem = RealFileSystem> {
    config: PipelineConfig,
    fs: FS,
}

impl Pipeline {
    /// Create a pipeline on the real filesystem
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use shotdiff::pipeline::{Pipeline, PipelineConfig};
    ///
    /// let pipeline = Pipeline::new(PipelineConfig::for_root("."));
    /// let outcome = pipeline.run()?;
    /// println!("{} changed, {} passed", outcome.summary.changed, outcome.summary.passed);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_fs(config, RealFileSystem)
    }
}

impl<FS: FileSystem> Pipeline<FS> {
    /// Create a pipeline with a custom filesystem implementation
    pub fn with_fs(config: PipelineConfig, fs: FS) -> Self {
        Self { config, fs }
    }

    /// The configuration this pipeline runs with
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Compare all pairs and persist the results document.
    pub fn compare(&self, observer: &dyn ProgressObserver) -> Result<ResultSet> {
        info!(
            "Comparing {} against {}",
            self.config.layout.current.display(),
            self.config.layout.baselines.display()
        );
        Aggregator::new(
            &self.fs,
            &self.config.layout,
            &self.config.widths,
            &self.config.diff,
        )
        .run(observer)
    }

    /// Build the report from the persisted results document.
    pub fn report(&self, clock: &dyn Clock) -> Result<ReportOutcome> {
        let results = ResultSet::load(&self.fs, &self.config.layout.results)?;
        self.report_results(&results, clock)
    }

    /// Build the report from an in-memory result set.
    pub fn report_results(&self, results: &ResultSet, clock: &dyn Clock) -> Result<ReportOutcome> {
        ReportWriter::new(&self.fs, &self.config.layout, &self.config.report).write(results, clock)
    }

    /// Compare then report, silently, on the wall clock.
    pub fn run(&self) -> Result<ReportOutcome> {
        self.run_with(&NoOpObserver, &SystemClock)
    }

    /// Compare then report with explicit progress observer and clock.
    pub fn run_with(
        &self,
        observer: &dyn ProgressObserver,
        clock: &dyn Clock,
    ) -> Result<ReportOutcome> {
        self.compare(observer)?;
        // Re-read from disk so `run` and `diff` + `report` see identical input
        self.report(clock)
    }
}
