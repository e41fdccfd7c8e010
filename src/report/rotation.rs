//! Retention of timestamped reports
//!
//! Rotation never fails a run: listing or removal problems are logged and
//! the remaining files are left in place.

use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::config::layout::is_timestamped_report;
use crate::infra::FileSystem;

/// Delete all but the newest `keep_last` timestamped reports in `dir`.
///
/// Report names embed an ISO-8601 timestamp, so lexical order is
/// chronological. `keep_last == 0` disables rotation. Returns the files
/// that were actually removed.
pub fn rotate_reports<FS: FileSystem>(fs: &FS, dir: &Path, keep_last: usize) -> Vec<PathBuf> {
    if keep_last == 0 {
        debug!("Report rotation disabled");
        return Vec::new();
    }

    let entries = match fs.list_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Skipping report rotation, cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut reports: Vec<PathBuf> = entries
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_timestamped_report)
        })
        .collect();
    reports.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

    let mut removed = Vec::new();
    for old in reports.into_iter().skip(keep_last) {
        match fs.remove_file(&old) {
            Ok(()) => {
                debug!("Removed old report {}", old.display());
                removed.push(old);
            }
            Err(e) => warn!("Could not remove old report {}: {}", old.display(), e),
        }
    }
    removed
}
