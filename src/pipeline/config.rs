//! Pipeline configuration types

use anyhow::{Context, Result};
use log::warn;
use std::path::Path;

use crate::config::{
    ConfigLoader, ConfigOverrides, ProjectLayout, ResolvedSettings, ValidatorRegistry,
};
use crate::diff::DiffOptions;
use crate::error::ShotdiffError;
use crate::infra::{FileSystem, RealFileSystem};
use crate::report::ReportOptions;

/// Validated configuration threaded through every stage
///
/// Built once at process start; no stage reads the environment.
///
/// # Examples
///
/// ```
/// use shotdiff::pipeline::PipelineConfig;
///
/// let config = PipelineConfig::for_root("/site");
/// assert_eq!(config.widths, vec![375, 1400]);
/// assert_eq!(config.diff.threshold, 0.1);
/// assert_eq!(config.report.keep_last, 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Viewport widths, in comparison order
    pub widths: Vec<u32>,
    /// Pixel comparison settings
    pub diff: DiffOptions,
    /// Classification and report settings
    pub report: ReportOptions,
    /// Artifact locations
    pub layout: ProjectLayout,
}

impl PipelineConfig {
    /// All defaults for a project at `root`.
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        Self {
            widths: crate::config::DEFAULT_WIDTHS.to_vec(),
            diff: DiffOptions::default(),
            report: ReportOptions::default(),
            layout: ProjectLayout::new(root),
        }
    }

    /// Validate resolved settings. Warnings are logged; the first error
    /// is returned as [`ShotdiffError::InvalidConfig`].
    pub fn from_settings(settings: ResolvedSettings) -> Result<Self, ShotdiffError> {
        let issues = ValidatorRegistry::new()
            .validate_all(&settings)
            .into_result()?;
        for issue in issues {
            match &issue.suggestion {
                Some(hint) => warn!("{}: {} ({})", issue.field, issue.message, hint),
                None => warn!("{}: {}", issue.field, issue.message),
            }
        }
        Ok(Self {
            widths: settings.widths,
            diff: settings.diff,
            report: settings.report,
            layout: settings.layout,
        })
    }

    /// Load `.shotdiff.toml` under `root`, apply overrides and validate.
    pub fn load(root: &Path, overrides: &ConfigOverrides) -> Result<Self> {
        Self::load_with_fs(root, overrides, &RealFileSystem)
    }

    /// [`PipelineConfig::load`] with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(
        root: &Path,
        overrides: &ConfigOverrides,
        fs: &FS,
    ) -> Result<Self> {
        let file = ConfigLoader::load_with_fs(root, fs)?;
        let settings = file.resolve(root, overrides);
        Self::from_settings(settings).context("Invalid configuration")
    }
}
