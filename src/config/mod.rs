//! Configuration for shotdiff
//!
//! This module provides:
//! - `.shotdiff.toml` file support with defaults for every setting
//! - Command-line overrides
//! - Validation rules run before any comparison work
//! - The project layout that locates every artifact

pub mod file;
pub mod layout;
pub mod loader;
pub mod validator;

pub use file::{
    ConfigFile, ConfigOverrides, DiffSettings, PathSettings, ReportSettings, ResolvedSettings,
    CONFIG_FILE_NAME, DEFAULT_WIDTHS,
};
pub use layout::ProjectLayout;
pub use loader::ConfigLoader;
pub use validator::{
    ConfigValidator, ValidationIssue, ValidationResult, ValidationSeverity, ValidatorRegistry,
};
