//! Markdown status comment for pull requests
//!
//! Rendering only; posting the comment is up to the CI job.

use std::fmt::{self, Write as _};

use super::summary::{Status, Summary, UrlStatus};

/// Passed entries are listed only when there are at most this many
const MAX_LISTED_PASSED: usize = 10;

/// Links and labels around the summary
#[derive(Debug, Clone, Default)]
pub struct CommentContext {
    /// Project name, shown upper-cased in the headline
    pub project: String,
    /// Environment under test
    pub environment_url: Option<String>,
    /// Environment the baselines were captured from
    pub baseline_url: Option<String>,
    /// CI run holding the full report artifacts
    pub run_url: Option<String>,
}

/// Render the comment body.
///
/// # Examples
///
/// ```
/// use shotdiff::report::{render_comment, CommentContext, Summary};
///
/// let ctx = CommentContext { project: "site".into(), ..Default::default() };
/// let body = render_comment(&Summary::default(), &ctx)?;
/// assert!(body.starts_with("## ✅ Visual Regression Test: All Passed (SITE)"));
/// # Ok::<(), std::fmt::Error>(())
/// ```
pub fn render_comment(summary: &Summary, ctx: &CommentContext) -> Result<String, fmt::Error> {
    let (emoji, status) = if summary.failed > 0 {
        ("❌", "Failed")
    } else if summary.changed > 0 {
        ("⚠️", "Changes Detected")
    } else {
        ("✅", "All Passed")
    };

    let mut out = String::new();
    writeln!(
        out,
        "## {} Visual Regression Test: {} ({})\n",
        emoji,
        status,
        ctx.project.to_uppercase()
    )?;

    let mut has_links = false;
    if let Some(url) = &ctx.environment_url {
        // Two trailing spaces force a Markdown line break
        writeln!(out, "**Environment:** [{url}]({url})  ")?;
        has_links = true;
    }
    if let Some(url) = &ctx.baseline_url {
        writeln!(out, "**Baseline:** [{url}]({url})")?;
        has_links = true;
    }
    if has_links {
        out.push('\n');
    }

    out.push_str("### 📊 Summary\n");
    out.push_str("| Status | Count |\n|--------|-------|\n");
    writeln!(out, "| ✅ Passed (No changes) | {} |", summary.passed)?;
    writeln!(out, "| ⚠️ Changed (Visual differences) | {} |", summary.changed)?;
    writeln!(out, "| ❌ Failed (Broken) | {} |", summary.failed)?;
    writeln!(out, "| **Total URLs Tested** | **{}** |\n", summary.total)?;

    if !summary.urls.is_empty() {
        render_details(&mut out, summary)?;
    }

    render_resources(&mut out, ctx)?;
    Ok(out)
}

fn render_details(out: &mut String, summary: &Summary) -> fmt::Result {
    out.push_str("\n### 📸 Detailed Results\n\n");

    let failed: Vec<&UrlStatus> = summary.with_status(Status::Failed).collect();
    if !failed.is_empty() {
        writeln!(out, "#### ❌ Failed ({})", failed.len())?;
        for entry in failed {
            writeln!(out, "- **{}**{}", entry.name, view_link(entry))?;
            if let Some(error) = &entry.error {
                writeln!(out, "  ```\n  {}\n  ```", error)?;
            }
        }
        out.push('\n');
    }

    let changed: Vec<&UrlStatus> = summary.with_status(Status::Changed).collect();
    if !changed.is_empty() {
        writeln!(out, "#### ⚠️ Visual Changes Detected ({})", changed.len())?;
        for entry in changed {
            let percent = if entry.diff_percent != 0.0 {
                format!("{:.2}%", entry.diff_percent)
            } else {
                "N/A".to_string()
            };
            writeln!(
                out,
                "- **{}** ({} difference){}",
                entry.name,
                percent,
                view_link(entry)
            )?;
        }
        out.push('\n');
    }

    let passed: Vec<&UrlStatus> = summary.with_status(Status::Passed).collect();
    if (1..=MAX_LISTED_PASSED).contains(&passed.len()) {
        writeln!(
            out,
            "<details>\n<summary>✅ Passed ({})</summary>\n",
            passed.len()
        )?;
        for entry in passed {
            writeln!(out, "- {}", entry.name)?;
        }
        out.push_str("\n</details>\n\n");
    }
    Ok(())
}

fn view_link(entry: &UrlStatus) -> String {
    entry
        .url
        .as_ref()
        .map(|url| format!(" - [View URL]({})", url))
        .unwrap_or_default()
}

fn render_resources(out: &mut String, ctx: &CommentContext) -> fmt::Result {
    let mut links = Vec::new();
    if let Some(url) = &ctx.run_url {
        links.push(format!("- 📦 [Download Full Report & Screenshots]({})", url));
    }
    if let Some(url) = &ctx.environment_url {
        links.push(format!("- 🖥️ [Preview Environment]({})", url));
    }
    if let Some(url) = &ctx.baseline_url {
        links.push(format!("- 🌐 [Compare with Baseline]({})", url));
    }
    if !links.is_empty() {
        out.push_str("### 🔗 Resources\n");
        for link in links {
            writeln!(out, "{}", link)?;
        }
        out.push('\n');
    }

    out.push_str("---\n");
    match &ctx.run_url {
        Some(url) => writeln!(
            out,
            "*Automated visual regression testing \u{2022} [Run]({})*",
            url
        )?,
        None => out.push_str("*Automated visual regression testing*\n"),
    }
    Ok(())
}
