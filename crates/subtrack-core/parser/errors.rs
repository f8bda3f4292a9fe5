//! Parse error and issue types
//!
//! `ParseError` covers the few conditions that abort a whole parse.
//! `ParseIssue` records every line or record that was skipped; issues are
//! collected for inspection and never stop the parser.

use core::fmt;
use thiserror::Error;

/// Unrecoverable parse failure
///
/// When one of these is returned the timeline is left empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Script text is larger than the configured limit
    #[error("Script is {size} bytes, limit is {limit}")]
    InputTooLarge { size: usize, limit: usize },

    /// Script has more lines than the configured limit
    #[error("Script has more than {limit} lines")]
    TooManyLines { limit: usize },

    /// Script bytes are not valid UTF-8
    #[error("Script is not valid UTF-8 (first bad byte at {position})")]
    InvalidEncoding { position: usize },
}

/// Parse issue severity levels
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueSeverity {
    /// Information that may be useful but doesn't affect the result
    Info,

    /// A line was skipped that probably should not have been
    Warning,

    /// A record was rejected for violating an invariant
    Error,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Issue categories for filtering
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    /// Section headers and lines outside sections
    Structure,

    /// Malformed format declarations and data lines
    Format,

    /// Timestamps that failed to decode
    Timing,

    /// Style definition problems
    Style,

    /// Dialogue records rejected after decoding
    Event,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure => write!(f, "structure"),
            Self::Format => write!(f, "format"),
            Self::Timing => write!(f, "timing"),
            Self::Style => write!(f, "style"),
            Self::Event => write!(f, "event"),
        }
    }
}

/// Recoverable problem found while parsing
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Issue severity level
    pub severity: IssueSeverity,

    /// Issue category for filtering/grouping
    pub category: IssueCategory,

    /// Human-readable message
    pub message: String,

    /// Line number where issue occurred (1-based)
    pub line: usize,
}

impl ParseIssue {
    /// Issue with an explicit severity
    #[must_use]
    pub const fn new(
        severity: IssueSeverity,
        category: IssueCategory,
        message: String,
        line: usize,
    ) -> Self {
        Self {
            severity,
            category,
            message,
            line,
        }
    }

    /// Create an info-level issue
    #[must_use]
    pub const fn info(category: IssueCategory, message: String, line: usize) -> Self {
        Self::new(IssueSeverity::Info, category, message, line)
    }

    /// Create a warning-level issue
    #[must_use]
    pub const fn warning(category: IssueCategory, message: String, line: usize) -> Self {
        Self::new(IssueSeverity::Warning, category, message, line)
    }

    /// Create an error-level issue
    #[must_use]
    pub const fn error(category: IssueCategory, message: String, line: usize) -> Self {
        Self::new(IssueSeverity::Error, category, message, line)
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] line {}: {}",
            self.severity, self.category, self.line, self.message
        )
    }
}
