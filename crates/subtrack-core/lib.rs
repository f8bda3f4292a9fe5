//! # Subtrack Core
//!
//! Parser and temporal index for multi-track ASS (Advanced `SubStation`
//! Alpha) dialogue, built for language-learning players that show several
//! parallel tracks (target text, romanization, translation) and jump
//! sentence by sentence.
//!
//! ## Features
//!
//! - **Tolerant parsing**: malformed lines are skipped and reported as
//!   [`ParseIssue`]s, never as errors
//! - **Format-driven decoding**: field order follows each section's
//!   `Format:` line, commas inside dialogue text survive
//! - **Per-tick queries**: active events found by binary search over the
//!   start-sorted store
//! - **Sentence navigation**: per-track dedup and merge of fragmented
//!   lines before next/previous jumps
//!
//! ## Quick Start
//!
//! ```rust
//! use subtrack_core::SubtitleTimeline;
//!
//! let script_text = r"
//! [Script Info]
//! Title: Example
//! ScriptType: v4.00+
//!
//! [V4+ Styles]
//! Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
//! Style: Hanzi,Noto Sans CJK SC,48,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1
//! Style: Pinyin,Arial,24,&H0000FFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1
//!
//! [Events]
//! Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
//! Dialogue: 0,0:00:01.00,0:00:05.00,Hanzi,,0,0,0,,你好
//! Dialogue: 0,0:00:01.00,0:00:05.00,Pinyin,,0,0,0,,nǐ hǎo
//! Dialogue: 0,0:00:06.00,0:00:10.00,Hanzi,,0,0,0,,谢谢
//! ";
//!
//! let mut timeline = SubtitleTimeline::new();
//! timeline.try_parse(script_text)?;
//!
//! let now = timeline.active_events_by_track(2.0);
//! assert_eq!(now.keys().collect::<Vec<_>>(), vec!["Hanzi", "Pinyin"]);
//! assert_eq!(timeline.style_of("Pinyin").map(|s| s.display_color.as_str()), Some("#FFFF00"));
//! assert_eq!(timeline.next_event_time(2.0), Some(6.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]

pub mod parser;
pub mod timeline;
pub mod utils;

pub use parser::{
    DialogueEvent, ParseError, ParseIssue, ParserConfig, ScriptMetadata, StyleDefinition,
};
pub use timeline::{NavigableEvent, NavigationConfig, ParseStatistics, SubtitleTimeline};
pub use utils::CoreError;

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Script dialects named by the `ScriptType` header
///
/// Parsing does not depend on the dialect; it is exposed for callers that
/// display or validate it.
///
/// # Examples
///
/// ```rust
/// use subtrack_core::ScriptVersion;
///
/// assert_eq!(ScriptVersion::from_header("v4.00+"), Some(ScriptVersion::AssV4));
/// assert_eq!(ScriptVersion::from_header("V4.00"), Some(ScriptVersion::SsaV4));
/// assert_eq!(ScriptVersion::from_header("v5"), None);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptVersion {
    /// SSA v4.00
    SsaV4,
    /// ASS v4.00+
    AssV4,
    /// ASS v4.00++ (libass extensions)
    AssV4Plus,
}

impl ScriptVersion {
    /// Parse a `ScriptType` header value, ignoring case
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        match header.trim().to_ascii_lowercase().as_str() {
            "v4.00" => Some(Self::SsaV4),
            "v4.00+" => Some(Self::AssV4),
            "v4.00++" | "v4.00+ extended" => Some(Self::AssV4Plus),
            _ => None,
        }
    }
}

/// Result type for core operations, using the crate's unified `CoreError`.
pub type Result<T> = core::result::Result<T, CoreError>;
