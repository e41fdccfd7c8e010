//! Latest command implementation

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::ConfigOverrides;
use crate::error::ShotdiffError;
use crate::pipeline::PipelineConfig;

/// Locate `latest.html` for the project at `root`.
pub fn latest_report_path(root: &Path, overrides: &ConfigOverrides) -> Result<PathBuf> {
    let config = PipelineConfig::load(root, overrides)?;
    let path = config.layout.latest_report();
    if !path.is_file() {
        return Err(ShotdiffError::FileNotFound {
            path,
            operation: "shotdiff latest".to_string(),
        }
        .into());
    }
    Ok(path)
}

/// Print the path of the most recent report, for `open $(shotdiff latest)`
pub fn cmd_latest(root: &Path, overrides: &ConfigOverrides) -> Result<()> {
    let path = latest_report_path(root, overrides)?;
    println!("{}", path.display());
    Ok(())
}
