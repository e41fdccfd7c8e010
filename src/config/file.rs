//! Configuration file data structures

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::layout::ProjectLayout;
use crate::diff::DiffOptions;
use crate::report::{ReportOptions, DEFAULT_EPSILON, DEFAULT_KEEP_LAST, DEFAULT_NOTABLE_THRESHOLD};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".shotdiff.toml";

/// Viewport widths compared when none are configured
pub const DEFAULT_WIDTHS: [u32; 2] = [375, 1400];

/// shotdiff configuration file structure
///
/// Every field is optional; anything left out falls back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Viewport widths to compare, in comparison order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widths: Option<Vec<u32>>,

    /// Pixel comparison settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffSettings>,

    /// Classification and report settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportSettings>,

    /// Artifact locations, relative to the project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathSettings>,
}

/// `[diff]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DiffSettings {
    /// Perceptual matching threshold, 0..=1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Opacity of unchanged pixels in diff images, 0..=1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,

    /// Count anti-aliased pixels as mismatches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_aa: Option<bool>,
}

/// `[report]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReportSettings {
    /// Mismatch percent treated as zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<f64>,

    /// Percent above which report cards are emphasised
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notable_threshold: Option<f64>,

    /// Timestamped reports to keep (0 keeps all)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_last: Option<usize>,
}

/// `[paths]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PathSettings {
    /// Baseline screenshots directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baselines: Option<PathBuf>,
    /// Current screenshots directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<PathBuf>,
    /// Diff images directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diffs: Option<PathBuf>,
    /// Results document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<PathBuf>,
    /// Reports directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports: Option<PathBuf>,
    /// Summary document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<PathBuf>,
    /// Capture failures document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_failures: Option<PathBuf>,
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// `--widths`
    pub widths: Option<Vec<u32>>,
    /// `--threshold`
    pub threshold: Option<f64>,
    /// `--keep-last`
    pub keep_last: Option<usize>,
}

/// Fully resolved (but not yet validated) settings
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    /// Widths in comparison order
    pub widths: Vec<u32>,
    /// Pixel comparison options
    pub diff: DiffOptions,
    /// Report options
    pub report: ReportOptions,
    /// Artifact paths
    pub layout: ProjectLayout,
}

impl ConfigFile {
    /// A file with every setting written out at its default, as produced
    /// by `shotdiff init`.
    pub fn with_defaults() -> Self {
        let diff = DiffOptions::default();
        Self {
            widths: Some(DEFAULT_WIDTHS.to_vec()),
            diff: Some(DiffSettings {
                threshold: Some(diff.threshold),
                alpha: Some(diff.alpha),
                include_aa: Some(diff.include_aa),
            }),
            report: Some(ReportSettings {
                epsilon: Some(DEFAULT_EPSILON),
                notable_threshold: Some(DEFAULT_NOTABLE_THRESHOLD),
                keep_last: Some(DEFAULT_KEEP_LAST),
            }),
            paths: None,
        }
    }

    /// Merge file values, overrides and defaults for a project at `root`.
    pub fn resolve(&self, root: &Path, overrides: &ConfigOverrides) -> ResolvedSettings {
        let widths = overrides
            .widths
            .clone()
            .or_else(|| self.widths.clone())
            .unwrap_or_else(|| DEFAULT_WIDTHS.to_vec());

        let diff_file = self.diff.clone().unwrap_or_default();
        let defaults = DiffOptions::default();
        let diff = DiffOptions {
            threshold: overrides
                .threshold
                .or(diff_file.threshold)
                .unwrap_or(defaults.threshold),
            alpha: diff_file.alpha.unwrap_or(defaults.alpha),
            include_aa: diff_file.include_aa.unwrap_or(defaults.include_aa),
            ..defaults
        };

        let report_file = self.report.clone().unwrap_or_default();
        let report = ReportOptions {
            epsilon: report_file.epsilon.unwrap_or(DEFAULT_EPSILON),
            notable_threshold: report_file
                .notable_threshold
                .unwrap_or(DEFAULT_NOTABLE_THRESHOLD),
            keep_last: overrides
                .keep_last
                .or(report_file.keep_last)
                .unwrap_or(DEFAULT_KEEP_LAST),
        };

        ResolvedSettings {
            widths,
            diff,
            report,
            layout: self.layout(root),
        }
    }

    fn layout(&self, root: &Path) -> ProjectLayout {
        let mut layout = ProjectLayout::new(root);
        let Some(paths) = &self.paths else {
            return layout;
        };

        let slots: [(&Option<PathBuf>, &mut PathBuf); 7] = [
            (&paths.baselines, &mut layout.baselines),
            (&paths.current, &mut layout.current),
            (&paths.diffs, &mut layout.diffs),
            (&paths.results, &mut layout.results),
            (&paths.reports, &mut layout.reports),
            (&paths.summary, &mut layout.summary),
            (&paths.capture_failures, &mut layout.capture_failures),
        ];
        for (configured, slot) in slots {
            if let Some(path) = configured {
                *slot = root.join(path);
            }
        }
        layout
    }
}
