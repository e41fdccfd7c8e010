//! Error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages naming the failing file or config key
//! - Suggested fixes
//! - Proper exit codes for CI/CD
//!
//! Missing screenshot pairs and report rotation problems are deliberately
//! *not* represented here: they are skipped or logged, never fatal.
//!
//! # Examples
//!
//! ```
//! use shotdiff::error::ShotdiffError;
//!
//! let err = ShotdiffError::InvalidConfig {
//!     field: "diff.threshold".to_string(),
//!     message: "must be between 0 and 1".to_string(),
//!     hint: None,
//! };
//! assert_eq!(err.exit_code(), 78);
//! assert!(err.to_string().contains("diff.threshold"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a shotdiff run
#[derive(Error, Debug)]
pub enum ShotdiffError {
    /// A configuration value failed validation
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfig {
        /// Dotted config key, e.g. `report.keep-last`
        field: String,
        /// What is wrong with the value
        message: String,
        /// Fix proposed by the failing rule, if it has one
        hint: Option<String>,
    },

    /// The configuration file exists but could not be parsed
    #[error("Failed to parse configuration file {path}: {message}")]
    ConfigParse {
        /// Path to the config file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A screenshot file does not follow the `<key>__<width>.png` convention
    #[error("Invalid screenshot file name '{file_name}': {reason}")]
    InvalidShotName {
        /// Offending file name
        file_name: String,
        /// Why it was rejected
        reason: String,
    },

    /// An image file exists but could not be decoded
    #[error("Failed to decode image {path}")]
    ImageDecode {
        /// Path to the image
        path: PathBuf,
        #[source]
        /// Decoder error
        source: image::ImageError,
    },

    /// A diff image could not be encoded or written
    #[error("Failed to encode image {path}")]
    ImageEncode {
        /// Destination path
        path: PathBuf,
        #[source]
        /// Encoder error
        source: image::ImageError,
    },

    /// A JSON document produced by an earlier stage is malformed
    #[error("Failed to parse {document} at {path}")]
    DocumentParse {
        /// Document kind ("results", "summary", "capture failures")
        document: &'static str,
        /// Path to the document
        path: PathBuf,
        #[source]
        /// JSON error
        source: serde_json::Error,
    },

    /// Formatting the HTML report failed
    #[error("Failed to render report")]
    Render(#[from] std::fmt::Error),

    /// A pixel buffer does not match its declared dimensions
    #[error("Pixel buffer of {len} bytes does not match {width}x{height} RGBA")]
    RasterShape {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// Actual buffer length
        len: usize,
    },

    /// A file that the command needs does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to missing file
        path: PathBuf,
        /// Operation that required the file
        operation: String,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl ShotdiffError {
    /// Wrap an I/O error with a short description of what was being done.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use shotdiff::error::ShotdiffError;
    ///
    /// let error = ShotdiffError::InvalidShotName {
    ///     file_name: "home.png".to_string(),
    ///     reason: "missing '__<width>' suffix".to_string(),
    /// };
    /// assert!(error.suggestion().unwrap().contains("__"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::InvalidConfig { field, hint, .. } => Some(hint.clone().unwrap_or_else(|| {
                format!(
                    "Fix '{}' in .shotdiff.toml or the matching command-line flag",
                    field
                )
            })),
            Self::ConfigParse { .. } => Some(
                "Check the TOML syntax, or run 'shotdiff init --force' to regenerate defaults"
                    .to_string(),
            ),
            Self::InvalidShotName { .. } => Some(
                "Screenshots must be named <key>__<width>.png, e.g. home__1400.png".to_string(),
            ),
            Self::ImageDecode { path, .. } => Some(format!(
                "Re-capture {} or restore it from the accepted baseline set",
                path.display()
            )),
            Self::ImageEncode { .. } => {
                Some("Check free disk space and permissions of the diffs directory".to_string())
            }
            Self::DocumentParse { .. } => {
                Some("Delete the file and re-run 'shotdiff run' to regenerate it".to_string())
            }
            Self::RasterShape { .. } | Self::Render(_) => None,
            Self::FileNotFound { path, operation } => Some(format!(
                "Ensure {} exists before running {}",
                path.display(),
                operation
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Follows sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use shotdiff::error::ShotdiffError;
    /// use std::path::PathBuf;
    ///
    /// let error = ShotdiffError::FileNotFound {
    ///     path: PathBuf::from("reports/latest.html"),
    ///     operation: "latest".to_string(),
    /// };
    /// assert_eq!(error.exit_code(), 66);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig { .. } => 78,    // EX_CONFIG
            Self::ConfigParse { .. } => 78,      // EX_CONFIG
            Self::InvalidShotName { .. } => 65,  // EX_DATAERR
            Self::ImageDecode { .. } => 65,      // EX_DATAERR
            Self::DocumentParse { .. } => 65,    // EX_DATAERR
            Self::ImageEncode { .. } => 74,      // EX_IOERR
            Self::Io { .. } => 74,               // EX_IOERR
            Self::FileNotFound { .. } => 66,     // EX_NOINPUT
            Self::RasterShape { .. } => 70,      // EX_SOFTWARE
            Self::Render(_) => 70,
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and a suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(sd_error) = Self::find(error) {
            if let Some(suggestion) = sd_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        Self::find(error).map_or(1, ShotdiffError::exit_code)
    }

    fn find(error: &anyhow::Error) -> Option<&ShotdiffError> {
        error
            .chain()
            .find_map(|cause| cause.downcast_ref::<ShotdiffError>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn decode_error() -> image::ImageError {
        image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "truncated",
        ))
    }

    #[test]
    fn test_invalid_config_names_field_in_message_and_suggestion() {
        let err = ShotdiffError::InvalidConfig {
            field: "widths".to_string(),
            message: "must not be empty".to_string(),
            hint: None,
        };

        assert!(err.to_string().contains("widths"));
        assert!(err.suggestion().unwrap().contains("widths"));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_invalid_config_prefers_rule_hint() {
        let err = ShotdiffError::InvalidConfig {
            field: "widths".to_string(),
            message: "must not be empty".to_string(),
            hint: Some("Set widths = [375, 1400]".to_string()),
        };

        assert_eq!(err.suggestion().as_deref(), Some("Set widths = [375, 1400]"));
        let formatted = ErrorFormatter::format(&anyhow::Error::new(err));
        assert!(formatted.contains("Set widths = [375, 1400]"));
    }

    #[test]
    fn test_image_decode_points_at_file() {
        let err = ShotdiffError::ImageDecode {
            path: PathBuf::from("baselines/home__375.png"),
            source: decode_error(),
        };

        assert!(err.to_string().contains("home__375.png"));
        assert!(err.suggestion().unwrap().contains("home__375.png"));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_all_error_variants_have_exit_codes() {
        let errors = vec![
            ShotdiffError::InvalidConfig {
                field: "x".to_string(),
                message: "y".to_string(),
                hint: None,
            },
            ShotdiffError::ConfigParse {
                path: PathBuf::from(".shotdiff.toml"),
                message: "bad".to_string(),
            },
            ShotdiffError::InvalidShotName {
                file_name: "a.png".to_string(),
                reason: "bad".to_string(),
            },
            ShotdiffError::ImageDecode {
                path: PathBuf::from("a.png"),
                source: decode_error(),
            },
            ShotdiffError::ImageEncode {
                path: PathBuf::from("a.png"),
                source: decode_error(),
            },
            ShotdiffError::DocumentParse {
                document: "results",
                path: PathBuf::from("results.json"),
                source: serde_json::from_str::<u32>("x").unwrap_err(),
            },
            ShotdiffError::RasterShape {
                width: 1,
                height: 1,
                len: 3,
            },
            ShotdiffError::Render(std::fmt::Error),
            ShotdiffError::FileNotFound {
                path: PathBuf::from("x"),
                operation: "latest".to_string(),
            },
            ShotdiffError::io("writing results", std::io::Error::other("disk full")),
        ];

        for err in errors {
            let exit_code = err.exit_code();
            assert!(exit_code > 0, "Error {:?} should have non-zero exit code", err);
            assert!(exit_code < 256, "Exit code should fit in a byte");
        }
    }

    #[test]
    fn test_formatter_finds_error_behind_context() {
        let result: anyhow::Result<()> = Err(ShotdiffError::InvalidShotName {
            file_name: "home.png".to_string(),
            reason: "missing '__<width>' suffix".to_string(),
        })
        .context("Failed to index baselines");

        let err = result.unwrap_err();
        assert_eq!(ErrorFormatter::exit_code(&err), 65);

        let formatted = ErrorFormatter::format(&err);
        assert!(formatted.contains("Failed to index baselines"));
        assert!(formatted.contains("home.png"));
        assert!(formatted.contains("<key>__<width>.png"));
    }

    #[test]
    fn test_formatter_falls_back_to_generic_exit_code() {
        let err = anyhow::anyhow!("something unexpected");
        assert_eq!(ErrorFormatter::exit_code(&err), 1);
    }
}
