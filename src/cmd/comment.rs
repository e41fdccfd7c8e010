//! Comment command implementation
//!
//! Handles `shotdiff comment`: render the pull-request status comment from
//! the summary document of the last report.

use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::config::ConfigOverrides;
use crate::infra::{FileSystem, RealFileSystem};
use crate::pipeline::PipelineConfig;
use crate::report::{render_comment, CommentContext, Summary};

/// Render the Markdown comment to stdout, or to `output` when given
pub fn cmd_comment(
    root: &Path,
    overrides: &ConfigOverrides,
    ctx: &CommentContext,
    output: Option<&Path>,
) -> Result<()> {
    cmd_comment_with_fs(root, overrides, ctx, output, &RealFileSystem)
}

/// [`cmd_comment`] with a custom filesystem implementation
pub fn cmd_comment_with_fs<FS: FileSystem>(
    root: &Path,
    overrides: &ConfigOverrides,
    ctx: &CommentContext,
    output: Option<&Path>,
    fs: &FS,
) -> Result<()> {
    let config = PipelineConfig::load_with_fs(root, overrides, fs)?;
    let summary = Summary::load_or_default(fs, &config.layout.summary);
    let body = render_comment(&summary, ctx).context("Failed to render comment")?;

    match output {
        Some(path) => {
            fs.write(path, &body)
                .with_context(|| format!("Failed to write comment to {}", path.display()))?;
            info!("Wrote comment to {}", path.display());
        }
        None => print!("{}", body),
    }
    Ok(())
}
