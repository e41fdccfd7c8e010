//! Per-key classification and the summary document
//!
//! The summary is the contract with the PR-comment bot: its field names
//! (`total`, `passed`, `changed`, `failed`, `urls[].name/status/diffPercent`)
//! must not change.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::diff::ResultSet;
use crate::error::ShotdiffError;
use crate::infra::FileSystem;

/// Outcome for one logical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No visible difference at any width
    Passed,
    /// At least one width differs
    Changed,
    /// Capture reported an error for this key
    Failed,
}

/// Classify a key from its largest mismatch percent across widths.
///
/// Percentages at or below `epsilon` are floating noise and pass.
///
/// # Examples
///
/// ```
/// use shotdiff::report::{classify, Status};
///
/// assert_eq!(classify(0.0000005, 0.000001), Status::Passed);
/// assert_eq!(classify(0.000001, 0.000001), Status::Passed);
/// assert_eq!(classify(0.0001, 0.000001), Status::Changed);
/// ```
pub fn classify(max_percent: f64, epsilon: f64) -> Status {
    if max_percent <= epsilon {
        Status::Passed
    } else {
        Status::Changed
    }
}

/// One row of the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlStatus {
    /// Logical key
    pub name: String,
    /// Classification
    pub status: Status,
    /// Largest mismatch percent across widths; 0 for passed keys
    #[serde(default)]
    pub diff_percent: f64,
    /// Capture error, failed entries only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Page URL, failed entries only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One entry of the capture failures document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureFailure {
    /// Logical key that could not be captured
    pub name: String,
    /// Error message from the capture tooling
    pub error: String,
    /// Page URL, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CaptureFailure {
    /// Read the capture failures document. A missing file means no
    /// failures.
    pub fn load_all<FS: FileSystem>(fs: &FS, path: &Path) -> Result<Vec<Self>, ShotdiffError> {
        if !fs.exists(path) {
            debug!("No capture failures at {}", path.display());
            return Ok(Vec::new());
        }
        let text = fs
            .read_to_string(path)
            .map_err(|e| ShotdiffError::io(format!("reading {}", path.display()), e))?;
        serde_json::from_str(&text).map_err(|source| ShotdiffError::DocumentParse {
            document: "capture failures",
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Aggregate status counts plus one entry per key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Distinct keys observed
    pub total: usize,
    /// Keys classified passed
    pub passed: usize,
    /// Keys classified changed
    pub changed: usize,
    /// Keys classified failed
    pub failed: usize,
    /// Per-key entries, ordered by key
    #[serde(default)]
    pub urls: Vec<UrlStatus>,
}

impl Summary {
    /// Build the summary from scratch.
    ///
    /// Results are grouped by key, collapsing widths to the maximum
    /// percent. Capture failures override the comparison outcome for their
    /// key, and keys that only appear as failures still count.
    pub fn build(results: &ResultSet, failures: &[CaptureFailure], epsilon: f64) -> Self {
        let mut max_by_key: BTreeMap<&str, f64> = BTreeMap::new();
        for result in results {
            let entry = max_by_key.entry(result.key.as_str()).or_insert(0.0);
            *entry = entry.max(result.mismatch_percent);
        }

        let mut failure_by_key: BTreeMap<&str, &CaptureFailure> = BTreeMap::new();
        for failure in failures {
            failure_by_key
                .entry(failure.name.as_str())
                .or_insert(failure);
        }

        let mut keys: Vec<&str> = max_by_key
            .keys()
            .chain(failure_by_key.keys())
            .copied()
            .collect();
        keys.sort_unstable();
        keys.dedup();

        let mut summary = Summary::default();
        for key in keys {
            let max_percent = max_by_key.get(key).copied().unwrap_or(0.0);
            let entry = match failure_by_key.get(key) {
                Some(failure) => UrlStatus {
                    name: key.to_string(),
                    status: Status::Failed,
                    diff_percent: max_percent,
                    error: Some(failure.error.clone()),
                    url: failure.url.clone(),
                },
                None => {
                    let status = classify(max_percent, epsilon);
                    UrlStatus {
                        name: key.to_string(),
                        status,
                        diff_percent: if status == Status::Passed {
                            0.0
                        } else {
                            max_percent
                        },
                        error: None,
                        url: None,
                    }
                }
            };
            summary.record(entry);
        }
        summary
    }

    fn record(&mut self, entry: UrlStatus) {
        self.total += 1;
        match entry.status {
            Status::Passed => self.passed += 1,
            Status::Changed => self.changed += 1,
            Status::Failed => self.failed += 1,
        }
        self.urls.push(entry);
    }

    /// Entries with the given status, in summary order.
    pub fn with_status(&self, status: Status) -> impl Iterator<Item = &UrlStatus> {
        self.urls.iter().filter(move |u| u.status == status)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Write the document, replacing any previous run's file.
    pub fn save<FS: FileSystem>(&self, fs: &FS, path: &Path) -> Result<(), ShotdiffError> {
        if let Some(parent) = path.parent() {
            fs.create_dir_all(parent)
                .map_err(|e| ShotdiffError::io(format!("creating {}", parent.display()), e))?;
        }
        fs.write(path, self.to_json())
            .map_err(|e| ShotdiffError::io(format!("writing {}", path.display()), e))
    }

    /// Read a summary document.
    pub fn load<FS: FileSystem>(fs: &FS, path: &Path) -> Result<Self, ShotdiffError> {
        let text = fs
            .read_to_string(path)
            .map_err(|e| ShotdiffError::io(format!("reading {}", path.display()), e))?;
        serde_json::from_str(&text).map_err(|source| ShotdiffError::DocumentParse {
            document: "summary",
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a summary document for display, falling back to an empty
    /// summary when it is absent or unreadable.
    pub fn load_or_default<FS: FileSystem>(fs: &FS, path: &Path) -> Self {
        if !fs.exists(path) {
            return Self::default();
        }
        Self::load(fs, path).unwrap_or_else(|e| {
            warn!("Could not read {}: {}", path.display(), e);
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ComparisonResult;
    use crate::infra::RealFileSystem;
    use proptest::prelude::*;
    use tempfile::TempDir;

    const EPSILON: f64 = 0.000001;

    fn result(key: &str, width: u32, percent: f64) -> ComparisonResult {
        ComparisonResult {
            key: key.to_string(),
            width,
            canvas_width: width,
            canvas_height: 100,
            mismatch_pixel_count: 0,
            mismatch_percent: percent,
        }
    }

    fn failure(name: &str) -> CaptureFailure {
        CaptureFailure {
            name: name.to_string(),
            error: "Timeout 30000ms exceeded".to_string(),
            url: Some(format!("https://example.com/{}", name)),
        }
    }

    #[test]
    fn test_widths_collapse_to_max_percent() {
        let results: ResultSet = [
            result("home", 375, 0.0),
            result("home", 1400, 2.5),
            result("about", 375, 0.0),
        ]
        .into_iter()
        .collect();

        let summary = Summary::build(&results, &[], EPSILON);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.changed, 1);
        assert_eq!(summary.failed, 0);

        assert_eq!(summary.urls[0].name, "about");
        assert_eq!(summary.urls[0].status, Status::Passed);
        assert_eq!(summary.urls[1].name, "home");
        assert_eq!(summary.urls[1].status, Status::Changed);
        assert_eq!(summary.urls[1].diff_percent, 2.5);
    }

    #[test]
    fn test_passed_entries_report_zero_percent() {
        let results: ResultSet = [result("home", 375, 0.0000005)].into_iter().collect();
        let summary = Summary::build(&results, &[], EPSILON);
        assert_eq!(summary.urls[0].status, Status::Passed);
        assert_eq!(summary.urls[0].diff_percent, 0.0);
    }

    #[test]
    fn test_empty_results_give_empty_summary() {
        let summary = Summary::build(&ResultSet::new(), &[], EPSILON);
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_capture_failure_overrides_and_adds_keys() {
        let results: ResultSet = [result("home", 375, 0.0), result("blog", 375, 4.0)]
            .into_iter()
            .collect();
        let failures = [failure("home"), failure("contact")];

        let summary = Summary::build(&results, &failures, EPSILON);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.changed, 1);
        assert_eq!(summary.passed, 0);

        let names: Vec<_> = summary
            .with_status(Status::Failed)
            .map(|u| u.name.as_str())
            .collect();
        assert_eq!(names, vec!["contact", "home"]);

        let contact = &summary.urls[1];
        assert_eq!(contact.error.as_deref(), Some("Timeout 30000ms exceeded"));
        assert_eq!(contact.url.as_deref(), Some("https://example.com/contact"));
    }

    #[test]
    fn test_summary_json_shape() {
        let results: ResultSet = [result("home", 375, 1.25)].into_iter().collect();
        let summary = Summary::build(&results, &[failure("blog")], EPSILON);
        let json: serde_json::Value = serde_json::from_str(&summary.to_json()).unwrap();

        assert_eq!(json["total"], 2);
        assert_eq!(json["failed"], 1);
        assert_eq!(json["urls"][0]["name"], "blog");
        assert_eq!(json["urls"][0]["status"], "failed");
        assert!(json["urls"][0].get("error").is_some());
        assert_eq!(json["urls"][1]["status"], "changed");
        assert_eq!(json["urls"][1]["diffPercent"], 1.25);
        assert!(json["urls"][1].get("error").is_none());
        assert!(json["urls"][1].get("url").is_none());
    }

    #[test]
    fn test_capture_failures_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let failures =
            CaptureFailure::load_all(&RealFileSystem, &temp.path().join("none.json")).unwrap();
        assert!(failures.is_empty());
    }

    #[test]
    fn test_capture_failures_parse_optional_url() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("capture-failures.json");
        std::fs::write(&path, r#"[{"name":"home","error":"boom"}]"#).unwrap();

        let failures = CaptureFailure::load_all(&RealFileSystem, &path).unwrap();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].url.is_none());
    }

    #[test]
    fn test_capture_failures_malformed_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("capture-failures.json");
        std::fs::write(&path, r#"{"name":"home"}"#).unwrap();

        let err = CaptureFailure::load_all(&RealFileSystem, &path).unwrap_err();
        assert!(matches!(err, ShotdiffError::DocumentParse { .. }));
    }

    #[test]
    fn test_load_or_default_tolerates_garbage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("summary.json");
        std::fs::write(&path, "not json").unwrap();

        let summary = Summary::load_or_default(&RealFileSystem, &path);
        assert_eq!(summary, Summary::default());
    }

    proptest! {
        /// Property: classification flips exactly above epsilon
        #[test]
        fn prop_classification_boundary(
            epsilon in 0.0f64..1.0,
            offset in 1e-9f64..1.0,
        ) {
            prop_assert_eq!(classify(epsilon, epsilon), Status::Passed);
            prop_assert_eq!(classify(epsilon - offset.min(epsilon), epsilon), Status::Passed);
            prop_assert_eq!(classify(epsilon + offset, epsilon), Status::Changed);
        }

        /// Property: counts always add up to total
        #[test]
        fn prop_counts_sum_to_total(
            percents in proptest::collection::vec((0usize..6, 0.0f64..5.0), 0..20),
            failed in proptest::collection::vec(0usize..8, 0..4),
        ) {
            let results: ResultSet = percents
                .iter()
                .map(|(k, p)| result(&format!("k{}", k), 375, *p))
                .collect();
            let failures: Vec<_> = failed.iter().map(|k| failure(&format!("k{}", k))).collect();

            let summary = Summary::build(&results, &failures, EPSILON);
            prop_assert_eq!(summary.total, summary.passed + summary.changed + summary.failed);
            prop_assert_eq!(summary.total, summary.urls.len());
        }
    }
}
