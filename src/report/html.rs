//! Self-contained HTML report
//!
//! Every image is inlined as a base64 data URI so the report can be
//! archived or attached as a single file.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use super::ReportOptions;
use crate::config::ProjectLayout;
use crate::diff::{ComparisonResult, ResultSet};
use crate::error::ShotdiffError;
use crate::infra::FileSystem;

const STYLE: &str = r#"<style>
  body{font:14px/1.4 system-ui, sans-serif; padding:24px; color:#111;}
  h1{margin:0 0 12px;}
  h2{margin:32px 0 8px;}
  .row{display:grid; grid-template-columns: 1fr 1fr 1fr; gap:12px; align-items:start}
  .card{border:1px solid #ddd; padding:8px; border-radius:8px}
  img{max-width:100%; height:auto; display:block; background:#f9f9f9}
  .bad{background:#ffefef; border-color:#e88}
  .meta{font-size:12px; color:#555; margin-bottom:6px}
  .empty{padding:12px; border:1px dashed #ccc; border-radius:8px; color:#555; background:#fafafa}
</style>
"#;

/// Text of the placeholder shown when nothing differs
pub const NO_DIFFERENCES: &str = "No visual differences detected.";

/// Renders the report body from a result set
pub struct HtmlRenderer<'a, FS: FileSystem> {
    fs: &'a FS,
    layout: &'a ProjectLayout,
    options: &'a ReportOptions,
}

impl<'a, FS: FileSystem> HtmlRenderer<'a, FS> {
    /// Create a renderer reading images through `fs`.
    pub fn new(fs: &'a FS, layout: &'a ProjectLayout, options: &'a ReportOptions) -> Self {
        Self {
            fs,
            layout,
            options,
        }
    }

    /// Render the full document. `generated_at` is shown verbatim in the
    /// header.
    pub fn render(&self, results: &ResultSet, generated_at: &str) -> Result<String, ShotdiffError> {
        let mut html = String::new();
        html.push_str("<!doctype html>\n<meta charset=\"utf-8\" />\n");
        html.push_str("<title>Visual Regression Report</title>\n");
        html.push_str(STYLE);
        html.push_str("<h1>Visual Regression Report</h1>\n");
        writeln!(
            html,
            "<p class=\"meta\">Threshold: {} \u{2022} Generated: {}</p>",
            self.options.notable_threshold,
            escape_html(generated_at)
        )?;

        let offending = self.offending_rows(results);
        if offending.is_empty() {
            writeln!(html, "<div class=\"empty\">{}</div>", NO_DIFFERENCES)?;
            return Ok(html);
        }

        for (key, rows) in offending {
            writeln!(html, "<h2>{}</h2>", escape_html(key))?;
            for row in rows {
                self.render_row(&mut html, row)?;
            }
        }
        Ok(html)
    }

    /// Keys with at least one result above epsilon, lexically, each with
    /// its offending widths ascending.
    fn offending_rows<'r>(
        &self,
        results: &'r ResultSet,
    ) -> BTreeMap<&'r str, Vec<&'r ComparisonResult>> {
        let mut by_key: BTreeMap<&str, Vec<&ComparisonResult>> = BTreeMap::new();
        for result in results
            .iter()
            .filter(|r| r.mismatch_percent > self.options.epsilon)
        {
            by_key.entry(result.key.as_str()).or_default().push(result);
        }
        for rows in by_key.values_mut() {
            rows.sort_by_key(|r| r.width);
        }
        by_key
    }

    fn render_row(&self, html: &mut String, row: &ComparisonResult) -> Result<(), ShotdiffError> {
        let id = row.shot_id();
        let class = if row.mismatch_percent > self.options.notable_threshold {
            "card bad"
        } else {
            "card"
        };
        let diff_label = format!("Diff ({}% mismatched)", row.mismatch_percent);

        html.push_str("<div class=\"row\">\n");
        for (label, path) in [
            ("Baseline", self.layout.baseline_path(&id)),
            ("Current", self.layout.current_path(&id)),
            (diff_label.as_str(), self.layout.diff_path(&id)),
        ] {
            let image = match self.data_uri(&path)? {
                Some(uri) => format!("<img src=\"{}\" loading=\"lazy\"/>", uri),
                None => "<div class=\"meta\">missing</div>".to_string(),
            };
            writeln!(
                html,
                "  <div class=\"{}\">\n    <div class=\"meta\">{} @ {}px</div>\n    {}\n  </div>",
                class, label, row.width, image
            )?;
        }
        html.push_str("</div>\n");
        Ok(())
    }

    fn data_uri(&self, path: &Path) -> Result<Option<String>, ShotdiffError> {
        if !self.fs.exists(path) {
            return Ok(None);
        }
        let bytes = self
            .fs
            .read(path)
            .map_err(|e| ShotdiffError::io(format!("reading {}", path.display()), e))?;
        Ok(Some(format!("data:image/png;base64,{}", STANDARD.encode(bytes))))
    }
}

/// Escape text for HTML element content and attribute values.
///
/// ```
/// use shotdiff::report::escape_html;
///
/// assert_eq!(escape_html("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
