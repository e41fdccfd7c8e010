//! Configuration validation system
//!
//! Validation runs once, before any comparison work. Each rule reports
//! [`ValidationIssue`]s; any Error-severity issue aborts the run.

use std::collections::BTreeSet;

use super::file::ResolvedSettings;
use crate::error::ShotdiffError;

/// Validation severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    /// Warning - logged, the run continues
    Warning,
    /// Error - aborts the run
    Error,
}

/// A validation issue found in configuration
///
/// # Examples
///
/// ```
/// use shotdiff::config::validator::{ValidationIssue, ValidationSeverity};
///
/// let issue = ValidationIssue::error("diff.threshold", "must be between 0 and 1");
/// assert_eq!(issue.severity, ValidationSeverity::Error);
/// assert_eq!(issue.field, "diff.threshold");
///
/// let warning = ValidationIssue::warning("report.notable-threshold", "below epsilon")
///     .with_suggestion("Raise notable-threshold above epsilon");
/// assert!(warning.suggestion.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity level
    pub severity: ValidationSeverity,
    /// Dotted config key that has the issue
    pub field: String,
    /// Description of the issue
    pub message: String,
    /// Suggested fix (if available)
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new validation issue
    pub fn new(
        severity: ValidationSeverity,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create an error issue
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationSeverity::Error, field, message)
    }

    /// Create a warning issue
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationSeverity::Warning, field, message)
    }
}

/// Result of configuration validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors)
    pub valid: bool,
    /// Issues found during validation
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
        }
    }

    /// Add an issue
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        if issue.severity == ValidationSeverity::Error {
            self.valid = false;
        }
        self.issues.push(issue);
    }

    /// Get only errors
    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Error)
            .collect()
    }

    /// The first error as a [`ShotdiffError::InvalidConfig`] carrying the
    /// rule's suggestion; otherwise the remaining (warning) issues.
    pub fn into_result(self) -> Result<Vec<ValidationIssue>, ShotdiffError> {
        if let Some(issue) = self.errors().first() {
            return Err(ShotdiffError::InvalidConfig {
                field: issue.field.clone(),
                message: issue.message.clone(),
                hint: issue.suggestion.clone(),
            });
        }
        Ok(self.issues)
    }
}

/// A rule over resolved settings
pub trait ConfigValidator {
    /// Validator name
    fn name(&self) -> &str;

    /// Check the settings this rule cares about
    fn validate(&self, settings: &ResolvedSettings) -> ValidationResult;
}

/// Widths must be a non-empty list of distinct positive integers
pub struct WidthsValidator;

impl ConfigValidator for WidthsValidator {
    fn name(&self) -> &str {
        "widths"
    }

    fn validate(&self, settings: &ResolvedSettings) -> ValidationResult {
        let mut result = ValidationResult::success();
        let widths = &settings.widths;

        if widths.is_empty() {
            result.add_issue(
                ValidationIssue::error("widths", "at least one viewport width is required")
                    .with_suggestion("Set widths = [375, 1400]"),
            );
            return result;
        }

        if widths.contains(&0) {
            result.add_issue(
                ValidationIssue::error("widths", "viewport widths must be positive")
                    .with_suggestion("Remove 0 from widths"),
            );
        }

        let mut seen = BTreeSet::new();
        for width in widths {
            if !seen.insert(width) {
                result.add_issue(
                    ValidationIssue::error(
                        "widths",
                        format!("width {} is listed more than once", width),
                    )
                    .with_suggestion(format!("List {} only once in widths", width)),
                );
            }
        }
        result
    }
}

/// Threshold and alpha are unit-interval values
pub struct DiffValidator;

impl ConfigValidator for DiffValidator {
    fn name(&self) -> &str {
        "diff"
    }

    fn validate(&self, settings: &ResolvedSettings) -> ValidationResult {
        let mut result = ValidationResult::success();
        for (field, value) in [
            ("diff.threshold", settings.diff.threshold),
            ("diff.alpha", settings.diff.alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                result.add_issue(
                    ValidationIssue::error(field, format!("must be between 0 and 1, got {}", value))
                        .with_suggestion(format!("Set {} to a value from 0.0 to 1.0", field)),
                );
            }
        }
        result
    }
}

/// Epsilon and notable-threshold are finite, non-negative percentages
pub struct ReportValidator;

impl ConfigValidator for ReportValidator {
    fn name(&self) -> &str {
        "report"
    }

    fn validate(&self, settings: &ResolvedSettings) -> ValidationResult {
        let mut result = ValidationResult::success();
        let report = &settings.report;

        for (field, value) in [
            ("report.epsilon", report.epsilon),
            ("report.notable-threshold", report.notable_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                result.add_issue(ValidationIssue::error(
                    field,
                    format!("must be a finite, non-negative percentage, got {}", value),
                ));
            }
        }

        if result.valid && report.notable_threshold < report.epsilon {
            result.add_issue(
                ValidationIssue::warning(
                    "report.notable-threshold",
                    "is below epsilon, so every changed key is emphasised",
                )
                .with_suggestion("Raise notable-threshold above epsilon"),
            );
        }
        result
    }
}

/// Ordered collection of validators
pub struct ValidatorRegistry {
    validators: Vec<Box<dyn ConfigValidator>>,
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self {
            validators: vec![
                Box::new(WidthsValidator),
                Box::new(DiffValidator),
                Box::new(ReportValidator),
            ],
        }
    }
}

impl ValidatorRegistry {
    /// Registry with the built-in rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all validators
    pub fn validate_all(&self, settings: &ResolvedSettings) -> ValidationResult {
        let mut result = ValidationResult::success();
        for validator in &self.validators {
            log::debug!("Running {} validator", validator.name());
            for issue in validator.validate(settings).issues {
                result.add_issue(issue);
            }
        }
        result
    }
}
