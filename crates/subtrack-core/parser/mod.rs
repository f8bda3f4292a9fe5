//! ASS script parser
//!
//! Turns the text of a subtitle script into owned, validated records:
//! header metadata, a style table and a time-sorted event store. Parsing
//! is tolerant: a line that cannot be interpreted is skipped and recorded
//! as a [`ParseIssue`]. Only the limits in [`ParserConfig`] can fail a
//! parse as a whole.
//!
//! # Example
//!
//! ```rust
//! use subtrack_core::parser::{parse_script, ParserConfig};
//!
//! let text = "[Events]\nFormat: Start, End, Style, Text\nDialogue: 0:00:01.00,0:00:02.00,Hanzi,你好\n";
//! let script = parse_script(text, &ParserConfig::default())?;
//!
//! assert_eq!(script.events.len(), 1);
//! assert_eq!(script.events.tracks(), &["Hanzi"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod ast;
pub mod errors;
pub mod format;
mod main;
pub mod sections;

pub use ast::{DialogueEvent, ScriptMetadata, StyleDefinition};
pub use errors::{IssueCategory, IssueSeverity, ParseError, ParseIssue};

use crate::timeline::store::{EventStore, StyleTable};

/// Default cap on script size in bytes
pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024 * 1024;
/// Default cap on script line count
pub const DEFAULT_MAX_LINES: usize = 2_000_000;
/// Track assigned to dialogue lines with an empty style field
pub const DEFAULT_TRACK: &str = "Default";

/// Parser limits and defaults
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Scripts larger than this fail to parse
    pub max_input_bytes: usize,
    /// Scripts with more lines than this fail to parse
    pub max_lines: usize,
    /// Track for dialogue lines that name no style
    pub default_track: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_lines: DEFAULT_MAX_LINES,
            default_track: DEFAULT_TRACK.to_string(),
        }
    }
}

impl ParserConfig {
    /// Set maximum script size in bytes.
    #[must_use]
    pub const fn with_max_input_bytes(mut self, max: usize) -> Self {
        self.max_input_bytes = max;
        self
    }

    /// Set maximum number of lines.
    #[must_use]
    pub const fn with_max_lines(mut self, max: usize) -> Self {
        self.max_lines = max;
        self
    }

    /// Set the track used for style-less dialogue.
    #[must_use]
    pub fn with_default_track(mut self, track: impl Into<String>) -> Self {
        self.default_track = track.into();
        self
    }
}

/// Everything one successful parse produced
#[derive(Debug, Clone, Default)]
pub struct ParsedScript {
    /// `[Script Info]` pairs
    pub metadata: ScriptMetadata,
    /// Track definitions
    pub styles: StyleTable,
    /// Retained dialogue, sorted by start time
    pub events: EventStore,
    /// Lines and records that were skipped
    pub issues: Vec<ParseIssue>,
}

/// Parse script text into metadata, styles and sorted events
///
/// A leading byte order mark is ignored.
///
/// # Errors
///
/// Returns [`ParseError`] when the input exceeds the limits in `config`.
pub fn parse_script(source: &str, config: &ParserConfig) -> Result<ParsedScript, ParseError> {
    main::Parser::new(source, config).parse()
}

/// Decode raw bytes as UTF-8 and parse them
///
/// # Errors
///
/// Returns [`ParseError::InvalidEncoding`] for non-UTF-8 input, or any
/// error of [`parse_script`].
pub fn parse_script_bytes(bytes: &[u8], config: &ParserConfig) -> Result<ParsedScript, ParseError> {
    let source = core::str::from_utf8(bytes).map_err(|err| ParseError::InvalidEncoding {
        position: err.valid_up_to(),
    })?;
    parse_script(source, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builders() {
        let config = ParserConfig::default()
            .with_max_input_bytes(10)
            .with_max_lines(3)
            .with_default_track("Main");
        assert_eq!(config.max_input_bytes, 10);
        assert_eq!(config.max_lines, 3);
        assert_eq!(config.default_track, "Main");
    }

    #[test]
    fn default_track_applies_to_styleless_dialogue() {
        let config = ParserConfig::default().with_default_track("Main");
        let script = parse_script(
            "[Events]\nDialogue: 0,0:00:01.00,0:00:02.00,,,0,0,0,,hi\n",
            &config,
        )
        .unwrap();
        assert_eq!(script.events.tracks(), &["Main"]);
    }

    #[test]
    fn invalid_bytes_fail() {
        let err = parse_script_bytes(b"[Events]\n\xFF", &ParserConfig::default()).unwrap_err();
        assert_eq!(err, ParseError::InvalidEncoding { position: 9 });
    }
}
