//! Where every input and artifact lives, relative to a project root

use std::path::{Path, PathBuf};

use crate::naming::ShotId;

/// Stable name of the most recent HTML report
pub const LATEST_REPORT_NAME: &str = "latest.html";

/// Prefix of timestamped report files (`report-<timestamp>.html`)
pub const REPORT_PREFIX: &str = "report-";

/// Extension of report files
pub const REPORT_EXTENSION: &str = ".html";

/// Resolved artifact paths for one project
///
/// # Examples
///
/// ```
/// use shotdiff::config::ProjectLayout;
/// use shotdiff::naming::ShotId;
/// use std::path::Path;
///
/// let layout = ProjectLayout::new("/site");
/// let id = ShotId::new("home", 375);
/// assert_eq!(layout.baseline_path(&id), Path::new("/site/baselines/home__375.png"));
/// assert_eq!(layout.diff_path(&id), Path::new("/site/artifacts/diffs/home__375.png"));
/// assert_eq!(layout.latest_report(), Path::new("/site/reports/latest.html"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Accepted reference screenshots
    pub baselines: PathBuf,
    /// Screenshots from the run under test
    pub current: PathBuf,
    /// Generated diff images
    pub diffs: PathBuf,
    /// Results document
    pub results: PathBuf,
    /// Directory holding timestamped reports and the latest alias
    pub reports: PathBuf,
    /// Summary document consumed by the PR bot
    pub summary: PathBuf,
    /// Capture failures written by the capture tooling
    pub capture_failures: PathBuf,
}

impl ProjectLayout {
    /// Default layout under `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let artifacts = root.join("artifacts");
        Self {
            baselines: root.join("baselines"),
            current: artifacts.join("current"),
            diffs: artifacts.join("diffs"),
            results: artifacts.join("results.json"),
            reports: root.join("reports"),
            summary: artifacts.join("report").join("summary.json"),
            capture_failures: artifacts.join("capture-failures.json"),
        }
    }

    /// Baseline image for `id`
    pub fn baseline_path(&self, id: &ShotId) -> PathBuf {
        self.baselines.join(id.file_name())
    }

    /// Current image for `id`
    pub fn current_path(&self, id: &ShotId) -> PathBuf {
        self.current.join(id.file_name())
    }

    /// Diff image for `id`
    pub fn diff_path(&self, id: &ShotId) -> PathBuf {
        self.diffs.join(id.file_name())
    }

    /// Stable alias of the newest report
    pub fn latest_report(&self) -> PathBuf {
        self.reports.join(LATEST_REPORT_NAME)
    }

    /// Timestamped report path; `stamp` must already be file-name safe.
    pub fn timestamped_report(&self, stamp: &str) -> PathBuf {
        self.reports
            .join(format!("{}{}{}", REPORT_PREFIX, stamp, REPORT_EXTENSION))
    }
}

/// Whether a file name in the reports directory is a timestamped report
/// (and so subject to rotation). The latest alias never is.
pub fn is_timestamped_report(file_name: &str) -> bool {
    file_name.starts_with(REPORT_PREFIX) && file_name.ends_with(REPORT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_paths() {
        let layout = ProjectLayout::new("/p");
        assert_eq!(layout.baselines, Path::new("/p/baselines"));
        assert_eq!(layout.current, Path::new("/p/artifacts/current"));
        assert_eq!(layout.diffs, Path::new("/p/artifacts/diffs"));
        assert_eq!(layout.results, Path::new("/p/artifacts/results.json"));
        assert_eq!(layout.reports, Path::new("/p/reports"));
        assert_eq!(layout.summary, Path::new("/p/artifacts/report/summary.json"));
        assert_eq!(
            layout.capture_failures,
            Path::new("/p/artifacts/capture-failures.json")
        );
    }

    #[test]
    fn test_timestamped_report_name() {
        let layout = ProjectLayout::new("/p");
        assert_eq!(
            layout.timestamped_report("2024-01-02T03-04-05-678Z"),
            Path::new("/p/reports/report-2024-01-02T03-04-05-678Z.html")
        );
    }

    #[test]
    fn test_is_timestamped_report() {
        assert!(is_timestamped_report("report-2024-01-02T03-04-05-678Z.html"));
        assert!(!is_timestamped_report("latest.html"));
        assert!(!is_timestamped_report("report-notes.txt"));
        assert!(!is_timestamped_report("old-report-1.html"));
    }
}
