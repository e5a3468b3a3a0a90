//! Error types with contextual suggestions
//!
//! Extraction and rendering never fail; these errors only come from the
//! command layer (configuration, output files).
//!
//! # Examples
//!
//! ```
//! use idf_size_delta::error::SizeDeltaError;
//!
//! let error = SizeDeltaError::InvalidPrecision { precision: 42, max: 10 };
//! assert_eq!(error.exit_code(), 65);
//! assert!(error.suggestion().is_some());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// idf-size-delta errors with contextual suggestions
#[derive(Error, Debug)]
pub enum SizeDeltaError {
    /// Configuration file could not be parsed
    #[error("Invalid configuration file: {path}")]
    ConfigParse {
        /// Path to config file
        path: PathBuf,
        #[source]
        /// TOML error source
        source: toml_edit::de::Error,
    },

    /// Percentage precision out of range
    #[error("Invalid percentage precision: {precision}")]
    InvalidPrecision {
        /// Requested decimal places
        precision: usize,
        /// Largest supported value
        max: usize,
    },

    /// No application name on the command line or in the config file
    #[error("Application name required for {operation}")]
    MissingAppName {
        /// Operation requiring the name
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

impl SizeDeltaError {
    /// Get actionable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ConfigParse { path, .. } => Some(format!(
                "Fix the TOML syntax in {} or delete it to use defaults",
                path.display()
            )),
            Self::InvalidPrecision { max, .. } => {
                Some(format!("Use a precision between 0 and {}", max))
            }
            Self::MissingAppName { operation } => Some(format!(
                "Pass --app-name to {} or set app-name under [report] in .idf-size-delta.toml",
                operation
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error, following sysexits.h conventions.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigParse { .. } => 78,      // EX_CONFIG
            Self::InvalidPrecision { .. } => 65, // EX_DATAERR
            Self::MissingAppName { .. } => 64,   // EX_USAGE
            Self::Io { .. } => 74,               // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestion
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

        if let Some(suggestion) = error
            .downcast_ref::<SizeDeltaError>()
            .and_then(SizeDeltaError::suggestion)
        {
            output.push_str(&format!(
                "\n{} {}\n",
                style("help:").cyan().bold(),
                suggestion
            ));
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(err) = error.downcast_ref::<SizeDeltaError>() {
            err.exit_code()
        } else {
            1 // Generic error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error() -> toml_edit::de::Error {
        toml_edit::de::from_str::<crate::config::ConfigFile>("[report")
            .map(|_| ())
            .expect_err("unterminated table header must not parse")
    }

    #[test]
    fn test_exit_codes_follow_conventions() {
        let io = SizeDeltaError::Io {
            context: "writing size.json".to_string(),
            source: std::io::Error::other("test"),
        };
        assert_eq!(io.exit_code(), 74);

        let config = SizeDeltaError::ConfigParse {
            path: PathBuf::from(".idf-size-delta.toml"),
            source: parse_error(),
        };
        assert_eq!(config.exit_code(), 78);
    }

    #[test]
    fn test_all_error_variants_have_suggestions() {
        let errors = vec![
            SizeDeltaError::ConfigParse {
                path: PathBuf::from(".idf-size-delta.toml"),
                source: parse_error(),
            },
            SizeDeltaError::InvalidPrecision {
                precision: 99,
                max: 10,
            },
            SizeDeltaError::MissingAppName {
                operation: "render".to_string(),
            },
            SizeDeltaError::Io {
                context: "reading base.json".to_string(),
                source: std::io::Error::other("test"),
            },
        ];

        for err in &errors {
            let suggestion = err.suggestion();
            assert!(
                suggestion.is_some(),
                "Error {:?} should have a suggestion",
                err
            );
            assert!(err.exit_code() > 0 && err.exit_code() < 256);
        }
    }

    #[test]
    fn test_formatter_includes_cause_chain_and_help() {
        let err = anyhow::Error::new(SizeDeltaError::Io {
            context: "writing report.md".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });

        let formatted = ErrorFormatter::format(&err);
        assert!(formatted.contains("writing report.md"));
        assert!(formatted.contains("denied"));
        assert!(formatted.contains("permissions"));
        assert_eq!(ErrorFormatter::exit_code(&err), 74);
    }

    #[test]
    fn test_formatter_handles_foreign_errors() {
        let err = anyhow::anyhow!("something else");
        assert!(ErrorFormatter::format(&err).contains("something else"));
        assert_eq!(ErrorFormatter::exit_code(&err), 1);
    }
}
