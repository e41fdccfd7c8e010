//! The persisted results document
//!
//! One [`ComparisonResult`] per (key, width) pair that existed in both the
//! baseline and current sets, in comparison order. Later stages read this
//! document instead of re-diffing.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ShotdiffError;
use crate::infra::FileSystem;
use crate::naming::ShotId;

/// Measurement for one compared screenshot pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Logical key
    pub key: String,
    /// Configured viewport width
    pub width: u32,
    /// Width of the reconciled comparison canvas
    pub canvas_width: u32,
    /// Height of the reconciled comparison canvas
    pub canvas_height: u32,
    /// Pixels counted as different
    pub mismatch_pixel_count: u64,
    /// Mismatched share of the canvas, percent, rounded to 3 decimals
    pub mismatch_percent: f64,
}

impl ComparisonResult {
    /// The screenshot identity this result belongs to.
    pub fn shot_id(&self) -> ShotId {
        ShotId::new(self.key.clone(), self.width)
    }
}

/// Ordered sequence of comparison results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    results: Vec<ComparisonResult>,
}

impl ResultSet {
    /// An empty result set (the first-run state).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result, keeping insertion order.
    pub fn push(&mut self, result: ComparisonResult) {
        self.results.push(result);
    }

    /// Results in comparison order
    pub fn iter(&self) -> std::slice::Iter<'_, ComparisonResult> {
        self.results.iter()
    }

    /// Number of results
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no pair was compared
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> String {
        // A Vec of plain structs with finite floats always serializes
        serde_json::to_string_pretty(&self.results).unwrap_or_else(|_| "[]".to_string())
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

    /// Read the document. A missing file is the first-run state and yields
    /// an empty set; a malformed one is an error.
    pub fn load<FS: FileSystem>(fs: &FS, path: &Path) -> Result<Self, ShotdiffError> {
        if !fs.exists(path) {
            return Ok(Self::new());
        }
        let text = fs
            .read_to_string(path)
            .map_err(|e| ShotdiffError::io(format!("reading {}", path.display()), e))?;
        serde_json::from_str(&text).map_err(|source| ShotdiffError::DocumentParse {
            document: "results",
            path: path.to_path_buf(),
            source,
        })
    }
}

impl FromIterator<ComparisonResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = ComparisonResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ComparisonResult;
    type IntoIter = std::slice::Iter<'a, ComparisonResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::RealFileSystem;
    use tempfile::TempDir;

    fn sample(key: &str, width: u32, percent: f64) -> ComparisonResult {
        ComparisonResult {
            key: key.to_string(),
            width,
            canvas_width: width,
            canvas_height: 800,
            mismatch_pixel_count: 12,
            mismatch_percent: percent,
        }
    }

    #[test]
    fn test_json_uses_camel_case_field_names() {
        let set: ResultSet = [sample("home", 375, 0.004)].into_iter().collect();
        let json: serde_json::Value = serde_json::from_str(&set.to_json()).unwrap();

        let entry = &json[0];
        assert_eq!(entry["key"], "home");
        assert_eq!(entry["width"], 375);
        assert_eq!(entry["canvasWidth"], 375);
        assert_eq!(entry["canvasHeight"], 800);
        assert_eq!(entry["mismatchPixelCount"], 12);
        assert_eq!(entry["mismatchPercent"], 0.004);
    }

    #[test]
    fn test_empty_set_serializes_as_empty_array() {
        assert_eq!(ResultSet::new().to_json(), "[]");
    }

    #[test]
    fn test_save_then_load_keeps_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("artifacts").join("results.json");
        let fs = RealFileSystem;

        let set: ResultSet = [sample("b", 375, 1.0), sample("a", 1400, 0.0)]
            .into_iter()
            .collect();
        set.save(&fs, &path).unwrap();

        let loaded = ResultSet::load(&fs, &path).unwrap();
        assert_eq!(loaded, set);
        assert_eq!(loaded.iter().next().unwrap().key, "b");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let loaded = ResultSet::load(&RealFileSystem, &temp.path().join("nope.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_document_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("results.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ResultSet::load(&RealFileSystem, &path).unwrap_err();
        assert!(matches!(
            err,
            ShotdiffError::DocumentParse {
                document: "results",
                ..
            }
        ));
        assert_eq!(err.exit_code(), 65);
    }
}
