//! Comparison of every baseline/current pair into a results document

use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::BTreeSet;
use std::path::Path;

use super::pixel::{compare, DiffOptions};
use super::reconcile::reconcile;
use super::results::{ComparisonResult, ResultSet};
use crate::config::ProjectLayout;
use crate::fmt::{format_percent, round_percent};
use crate::infra::FileSystem;
use crate::naming::{is_candidate, ShotId};
use crate::pipeline::telemetry::{DiffEvent, ProgressObserver};
use crate::raster::RasterImage;

/// Walks the baseline set and diffs it against the current set
pub struct Aggregator<'a, FS: FileSystem> {
    fs: &'a FS,
    layout: &'a ProjectLayout,
    widths: &'a [u32],
    options: &'a DiffOptions,
}

impl<'a, FS: FileSystem> Aggregator<'a, FS> {
    /// Create an aggregator over `widths`, in the order given.
    pub fn new(
        fs: &'a FS,
        layout: &'a ProjectLayout,
        widths: &'a [u32],
        options: &'a DiffOptions,
    ) -> Self {
        Self {
            fs,
            layout,
            widths,
            options,
        }
    }

    /// Compare every (baseline key, configured width) pair, write one diff
    /// image per compared pair, and persist the results document.
    ///
    /// Pairs with a missing baseline or current image are skipped. Without
    /// a baseline directory the results document is written empty.
    pub fn run(&self, observer: &dyn ProgressObserver) -> Result<ResultSet> {
        let layout = self.layout;
        self.fs
            .create_dir_all(&layout.diffs)
            .with_context(|| format!("Failed to create {}", layout.diffs.display()))?;

        if !self.fs.exists(&layout.baselines) {
            info!(
                "No baseline directory at {}; writing empty results",
                layout.baselines.display()
            );
            let empty = ResultSet::new();
            empty.save(self.fs, &layout.results)?;
            return Ok(empty);
        }

        let keys = index_baseline_keys(self.fs, &layout.baselines)?;
        observer.observe(DiffEvent::Started {
            pairs: (keys.len() * self.widths.len()) as u64,
        });

        let mut results = ResultSet::new();
        for key in &keys {
            for &width in self.widths {
                let id = ShotId::new(key.as_str(), width);
                match self.compare_pair(&id)? {
                    Some(result) => {
                        observer.observe(DiffEvent::Compared(&result));
                        results.push(result);
                    }
                    None => observer.observe(DiffEvent::Skipped(&id)),
                }
            }
        }

        results.save(self.fs, &layout.results)?;
        observer.observe(DiffEvent::Finished);
        info!(
            "Compared {} pair(s) across {} key(s)",
            results.len(),
            keys.len()
        );
        Ok(results)
    }

    /// Diff one pair, or `None` when either image is absent.
    fn compare_pair(&self, id: &ShotId) -> Result<Option<ComparisonResult>> {
        let baseline_path = self.layout.baseline_path(id);
        let current_path = self.layout.current_path(id);

        if !self.fs.exists(&baseline_path) || !self.fs.exists(&current_path) {
            debug!("Skipping {}: baseline or current image missing", id);
            return Ok(None);
        }

        let baseline = RasterImage::load(self.fs, &baseline_path)
            .with_context(|| format!("Failed to load baseline for {}", id))?;
        let current = RasterImage::load(self.fs, &current_path)
            .with_context(|| format!("Failed to load current screenshot for {}", id))?;

        let (baseline, current) = reconcile(&baseline, &current);
        let diff = compare(&baseline, &current, self.options);

        let diff_path = self.layout.diff_path(id);
        diff.diff_image
            .save(self.fs, &diff_path)
            .with_context(|| format!("Failed to write diff image for {}", id))?;

        let percent = round_percent(diff.mismatch_percent());
        debug!("Diff {} -> {}", id, format_percent(percent));

        Ok(Some(ComparisonResult {
            key: id.key.clone(),
            width: id.width,
            canvas_width: baseline.width(),
            canvas_height: baseline.height(),
            mismatch_pixel_count: diff.mismatched_pixels,
            mismatch_percent: percent,
        }))
    }
}

/// Distinct logical keys in the baseline directory, lexically ordered.
///
/// Hidden and non-PNG files are ignored; a PNG that breaks the naming
/// convention is an error.
pub fn index_baseline_keys<FS: FileSystem>(fs: &FS, dir: &Path) -> Result<BTreeSet<String>> {
    let entries = fs
        .list_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?;

    let mut keys = BTreeSet::new();
    for path in entries {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            debug!("Ignoring non UTF-8 entry {}", path.display());
            continue;
        };
        if !is_candidate(file_name) {
            debug!("Ignoring {}", file_name);
            continue;
        }
        let id = ShotId::parse(file_name)
            .with_context(|| format!("Unrecognised baseline in {}", dir.display()))?;
        keys.insert(id.key);
    }
    Ok(keys)
}
