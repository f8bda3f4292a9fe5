//! Core error type for subtrack operations
//!
//! Provides the `CoreError` enum that wraps the failures of every module
//! in the crate. Line-level problems inside a script are never errors;
//! they are collected as [`ParseIssue`](crate::parser::ParseIssue)s instead.

use thiserror::Error;

use crate::parser::ParseError;

/// Main error type for subtrack core operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Parse-level failure that aborted a whole parse
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Time format parsing errors
    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    /// Color format parsing errors
    #[error("Invalid color format: {0}")]
    InvalidColor(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Check if error is recoverable
    ///
    /// Codec and configuration errors only cost the value that carried
    /// them; a parse error invalidates the whole parse.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Parse(_))
    }
}
