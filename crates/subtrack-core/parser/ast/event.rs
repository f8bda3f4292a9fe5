//! Dialogue event AST node
//!
//! A `DialogueEvent` is one timed utterance on one track. Only records with
//! two decodable timestamps and non-empty clean text become events; the
//! decoding step reports which rule a rejected record broke.

use crate::{
    parser::format::{FieldRecord, ACTOR_KEYS, END_KEYS, START_KEYS, STYLE_KEYS, TEXT_KEYS},
    utils::{decode_time, display_markup, strip_markup},
};

/// Timed dialogue line from the `[Events]` section
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueEvent {
    /// Track (style) name
    pub track: String,

    /// Speaker name, often empty
    pub actor: String,

    /// Start time as written in the script
    pub start_raw: String,

    /// End time as written in the script
    pub end_raw: String,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Text exactly as written, override tags included
    pub text: String,

    /// Text with override tags stripped and line breaks normalized
    pub clean_text: String,

    /// Text with color overrides and breaks converted to markup
    pub display_text: String,

    /// Source line number (1-based)
    pub line: usize,
}

/// Why a decoded dialogue record was not retained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventRejection {
    /// Start timestamp missing or malformed
    InvalidStart(String),
    /// End timestamp missing or malformed
    InvalidEnd(String),
    /// Text is empty once markup is stripped
    EmptyText,
}

impl DialogueEvent {
    /// Build an event from a decoded `Dialogue:` record
    ///
    /// An empty style field is assigned to `default_track`.
    ///
    /// # Errors
    ///
    /// Returns the [`EventRejection`] describing the broken invariant.
    pub fn from_record(
        record: &FieldRecord,
        default_track: &str,
        line: usize,
    ) -> Result<Self, EventRejection> {
        let start_raw = record.get_any(START_KEYS).unwrap_or_default();
        let end_raw = record.get_any(END_KEYS).unwrap_or_default();

        let start =
            decode_time(start_raw).ok_or_else(|| EventRejection::InvalidStart(start_raw.into()))?;
        let end = decode_time(end_raw).ok_or_else(|| EventRejection::InvalidEnd(end_raw.into()))?;

        let text = record.get_any(TEXT_KEYS).unwrap_or_default();
        let clean_text = strip_markup(text);
        if clean_text.is_empty() {
            return Err(EventRejection::EmptyText);
        }

        let track = record
            .get_any(STYLE_KEYS)
            .filter(|style| !style.is_empty())
            .unwrap_or(default_track);

        Ok(Self {
            track: track.to_string(),
            actor: record.get_any(ACTOR_KEYS).unwrap_or_default().to_string(),
            start_raw: start_raw.to_string(),
            end_raw: end_raw.to_string(),
            start,
            end,
            text: text.to_string(),
            display_text: display_markup(text),
            clean_text,
            line,
        })
    }

    /// Length of the event in seconds
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the event is showing at time `t` (both bounds inclusive)
    #[must_use]
    pub fn is_active_at(&self, t: f64) -> bool {
        (self.start..=self.end).contains(&t)
    }
}
