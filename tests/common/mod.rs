//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Fixture projects with baseline/current screenshots
//! - Assertion helpers for percentages and report artifacts
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures::ProjectFixture;
//!
//! let project = ProjectFixture::new();
//! project.baseline("home__375.png", 10, 10, [255, 255, 255, 255]);
//! project.current("home__375.png", 10, 10, [0, 0, 0, 255]);
//! ```

pub mod assertions;
pub mod fixtures;

/// Check if running in CI environment
#[allow(dead_code)]
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok() || std::env::var("GITHUB_ACTIONS").is_ok()
}
