//! Classification, HTML report, summary document and PR comment
//!
//! [`ReportWriter`] produces one run's artifact set from a persisted
//! [`ResultSet`]:
//! - `reports/report-<timestamp>.html` (new every run)
//! - `reports/latest.html` (overwritten every run)
//! - `artifacts/report/summary.json` (overwritten every run)
//!
//! followed by rotation of old timestamped reports.

pub mod comment;
pub mod html;
pub mod rotation;
pub mod summary;

pub use comment::{render_comment, CommentContext};
pub use html::{escape_html, HtmlRenderer, NO_DIFFERENCES};
pub use rotation::rotate_reports;
pub use summary::{classify, CaptureFailure, Status, Summary, UrlStatus};

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use std::path::PathBuf;

use crate::config::ProjectLayout;
use crate::diff::ResultSet;
use crate::infra::FileSystem;

/// Default tolerance below which a mismatch percent counts as zero
pub const DEFAULT_EPSILON: f64 = 0.000001;

/// Default percent above which report cards are emphasised
pub const DEFAULT_NOTABLE_THRESHOLD: f64 = 0.1;

/// Default number of timestamped reports kept
pub const DEFAULT_KEEP_LAST: usize = 10;

/// Classification and rendering settings
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Floating noise tolerance, in percent
    pub epsilon: f64,
    /// Display-only emphasis cutoff, in percent
    pub notable_threshold: f64,
    /// Timestamped reports to retain; 0 keeps all
    pub keep_last: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            notable_threshold: DEFAULT_NOTABLE_THRESHOLD,
            keep_last: DEFAULT_KEEP_LAST,
        }
    }
}

/// Source of report timestamps
pub trait Clock {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// ISO-8601 with milliseconds, e.g. `2024-05-01T10:00:00.000Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// [`iso_timestamp`] made file-name safe: `:` and `.` become `-`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use shotdiff::report::file_stamp;
///
/// let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
/// assert_eq!(file_stamp(at), "2024-05-01T10-00-00-000Z");
/// ```
pub fn file_stamp(at: DateTime<Utc>) -> String {
    iso_timestamp(at).replace([':', '.'], "-")
}

/// Files written by one report run
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    /// The new timestamped report
    pub report_path: PathBuf,
    /// The overwritten latest alias
    pub latest_path: PathBuf,
    /// The overwritten summary document
    pub summary_path: PathBuf,
    /// Summary that was written
    pub summary: Summary,
    /// Old reports deleted by rotation
    pub rotated: Vec<PathBuf>,
}

/// Writes the report artifact set for one run
pub struct ReportWriter<'a, FS: FileSystem> {
    fs: &'a FS,
    layout: &'a ProjectLayout,
    options: &'a ReportOptions,
}

impl<'a, FS: FileSystem> ReportWriter<'a, FS> {
    /// Create a writer over `layout`.
    pub fn new(fs: &'a FS, layout: &'a ProjectLayout, options: &'a ReportOptions) -> Self {
        Self {
            fs,
            layout,
            options,
        }
    }

    /// Classify, render and persist, then rotate old reports.
    pub fn write(&self, results: &ResultSet, clock: &dyn Clock) -> Result<ReportOutcome> {
        let layout = self.layout;
        let now = clock.now();

        let failures = CaptureFailure::load_all(self.fs, &layout.capture_failures)
            .context("Failed to load capture failures")?;
        let summary = Summary::build(results, &failures, self.options.epsilon);

        let html = HtmlRenderer::new(self.fs, layout, self.options)
            .render(results, &iso_timestamp(now))
            .context("Failed to render HTML report")?;

        self.fs
            .create_dir_all(&layout.reports)
            .with_context(|| format!("Failed to create {}", layout.reports.display()))?;

        let report_path = layout.timestamped_report(&file_stamp(now));
        self.fs
            .write(&report_path, &html)
            .with_context(|| format!("Failed to write {}", report_path.display()))?;

        let latest_path = layout.latest_report();
        self.fs
            .write(&latest_path, &html)
            .with_context(|| format!("Failed to write {}", latest_path.display()))?;

        summary
            .save(self.fs, &layout.summary)
            .context("Failed to write summary")?;

        let rotated = rotate_reports(self.fs, &layout.reports, self.options.keep_last);
        info!(
            "Report written to {} ({} old report(s) rotated)",
            report_path.display(),
            rotated.len()
        );

        Ok(ReportOutcome {
            report_path,
            latest_path,
            summary_path: layout.summary.clone(),
            summary,
            rotated,
        })
    }
}
