//! Report command implementation
//!
//! Handles the `shotdiff report` command: classify the persisted results,
//! render the HTML report and summary document, rotate old reports.

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::config::ConfigOverrides;
use crate::fmt::{format_percent, icon, CHART, CHECKMARK, CROSSMARK, SPARKLES, WARNING};
use crate::pipeline::{Pipeline, PipelineConfig};
use crate::report::{ReportOutcome, Status, SystemClock};

/// Build the report from `artifacts/results.json`
///
/// With `json`, only the summary document is printed, so stdout can be
/// piped straight into other tooling.
pub fn cmd_report(root: &Path, overrides: &ConfigOverrides, json: bool) -> Result<()> {
    let config = PipelineConfig::load(root, overrides)?;
    let pipeline = Pipeline::new(config);
    let outcome = pipeline.report(&SystemClock)?;

    if json {
        present_json(&outcome)
    } else {
        present_outcome(&outcome);
        Ok(())
    }
}

pub(crate) fn present_json(outcome: &ReportOutcome) -> Result<()> {
    let json = serde_json::to_string_pretty(&outcome.summary)
        .context("Failed to serialize summary")?;
    println!("{}", json);
    Ok(())
}

/// Human-readable rendition of a finished report
pub(crate) fn present_outcome(outcome: &ReportOutcome) {
    let summary = &outcome.summary;

    println!("{}{}", icon(&CHART), style(" Visual Regression Summary").bold());
    println!();
    println!("   Total:   {}", summary.total);
    println!("   Passed:  {}", style(summary.passed).green());
    println!("   Changed: {}", style(summary.changed).yellow());
    println!("   Failed:  {}", style(summary.failed).red());

    let changed: Vec<_> = summary.with_status(Status::Changed).collect();
    if !changed.is_empty() {
        println!();
        println!("{} {}", icon(&WARNING), style("Changed").yellow().bold());
        for entry in changed {
            println!(
                "   {} {} {}",
                style("•").dim(),
                entry.name,
                style(format_percent(entry.diff_percent)).yellow()
            );
        }
    }

    let failed: Vec<_> = summary.with_status(Status::Failed).collect();
    if !failed.is_empty() {
        println!();
        println!("{} {}", icon(&CROSSMARK), style("Failed").red().bold());
        for entry in failed {
            let error = entry.error.as_deref().unwrap_or("capture failed");
            println!("   {} {}: {}", style("•").dim(), entry.name, style(error).dim());
        }
    }

    println!();
    println!(
        "{} Report: {}",
        icon(&CHECKMARK),
        style(outcome.report_path.display()).cyan()
    );
    println!(
        "   {} Latest: {}",
        style("•").dim(),
        style(outcome.latest_path.display()).cyan()
    );
    println!(
        "   {} Summary: {}",
        style("•").dim(),
        style(outcome.summary_path.display()).cyan()
    );
    if !outcome.rotated.is_empty() {
        println!(
            "   {} Removed {} old report(s)",
            style("•").dim(),
            outcome.rotated.len()
        );
    }

    if summary.changed == 0 && summary.failed == 0 {
        println!();
        println!("{} No visual differences detected", icon(&SPARKLES));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{ComparisonResult, ResultSet};
    use crate::report::{CaptureFailure, Summary};
    use std::path::PathBuf;

    fn outcome(summary: Summary) -> ReportOutcome {
        ReportOutcome {
            report_path: PathBuf::from("reports/report-2024-01-01T00-00-00-000Z.html"),
            latest_path: PathBuf::from("reports/latest.html"),
            summary_path: PathBuf::from("artifacts/report/summary.json"),
            summary,
            rotated: vec![PathBuf::from("reports/report-old.html")],
        }
    }

    #[test]
    fn test_present_outcome_with_every_status() {
        let results: ResultSet = vec![ComparisonResult {
            key: "home".to_string(),
            width: 375,
            canvas_width: 375,
            canvas_height: 100,
            mismatch_pixel_count: 12,
            mismatch_percent: 0.032,
        }]
        .into_iter()
        .collect();
        let failures = vec![CaptureFailure {
            name: "pricing".to_string(),
            error: "timeout".to_string(),
            url: None,
        }];
        let summary = Summary::build(&results, &failures, 0.000001);

        // Should not panic
        present_outcome(&outcome(summary));
    }

    #[test]
    fn test_present_outcome_for_empty_summary() {
        present_outcome(&outcome(Summary::default()));
    }

    #[test]
    fn test_present_json_succeeds() {
        assert!(present_json(&outcome(Summary::default())).is_ok());
    }
}
