#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! shotdiff library
//!
//! This library provides the diff-and-report core of a visual regression
//! workflow: full-page screenshots named `<key>__<width>.png` are compared
//! against approved baselines, and the results are turned into an HTML
//! report, a summary document for CI, and a pull-request comment.
//! It can be used programmatically in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Comparing two screenshots of different heights:
//!
//! ```
//! use shotdiff::diff::{compare, reconcile, DiffOptions};
//! use shotdiff::raster::RasterImage;
//!
//! let baseline = RasterImage::filled(8, 4, [255, 255, 255, 255]);
//! let current = RasterImage::filled(8, 6, [255, 255, 255, 255]);
//!
//! // The shorter image is padded with white before comparing
//! let (a, b) = reconcile(&baseline, &current);
//! let diff = compare(&a, &b, &DiffOptions::default());
//! assert_eq!(diff.mismatched_pixels, 0);
//! ```
//!
//! # Advanced Example: Full Run
//!
//! Running both stages against a project directory:
//!
//! ```
//! use shotdiff::naming::ShotId;
//! use shotdiff::pipeline::{Pipeline, PipelineConfig};
//! use shotdiff::raster::RasterImage;
//! use shotdiff::report::Status;
//! use tempfile::TempDir;
//!
//! let project = TempDir::new().unwrap();
//! let config = PipelineConfig::for_root(project.path());
//!
//! let id = ShotId::from_label("Home Page", 375);
//! for dir in [&config.layout.baselines, &config.layout.current] {
//!     std::fs::create_dir_all(dir).unwrap();
//!     let png = RasterImage::filled(4, 4, [20, 40, 60, 255])
//!         .encode_png(&dir.join(id.file_name()))
//!         .unwrap();
//!     std::fs::write(dir.join(id.file_name()), png).unwrap();
//! }
//!
//! let outcome = Pipeline::new(config).run().unwrap();
//! assert_eq!(outcome.summary.total, 1);
//! assert_eq!(outcome.summary.urls[0].name, "home-page");
//! assert_eq!(outcome.summary.urls[0].status, Status::Passed);
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file, layout and validation
pub mod config;
/// Screenshot comparison and result aggregation
pub mod diff;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Screenshot file naming convention
pub mod naming;
/// Comparison pipeline orchestration
pub mod pipeline;
/// RGBA raster buffers and PNG codec
pub mod raster;
/// Classification, HTML report, summary and PR comment
pub mod report;
