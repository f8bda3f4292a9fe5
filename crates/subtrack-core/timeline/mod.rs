//! Parsed subtitle timeline and its queries
//!
//! [`SubtitleTimeline`] owns the result of the last successful parse and
//! answers the per-tick questions a player asks: what is showing now,
//! grouped how, and where the next or previous sentence starts.
//!
//! Parsing takes `&mut self` and every query takes `&self`, so a parse can
//! never overlap a query on the same instance. A failed parse leaves the
//! timeline empty, never half-filled.
//!
//! # Example
//!
//! ```rust
//! use subtrack_core::SubtitleTimeline;
//!
//! let script = "[Events]\n\
//! Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
//! Dialogue: 0,0:00:01.00,0:00:05.00,Hanzi,,0,0,0,,你好\n\
//! Dialogue: 0,0:00:06.00,0:00:10.00,Hanzi,,0,0,0,,再见\n";
//!
//! let mut timeline = SubtitleTimeline::new();
//! assert!(timeline.parse(script));
//! assert_eq!(timeline.active_events_at(2.5)[0].clean_text, "你好");
//! assert_eq!(timeline.next_event_time(2.5), Some(6.0));
//! assert_eq!(timeline.prev_event_time(2.5), None);
//! ```

pub mod config;
pub mod navigation;
pub mod query;
pub mod stats;
pub mod store;

pub use config::NavigationConfig;
pub use navigation::NavigableEvent;
pub use query::TrackGroups;
pub use stats::ParseStatistics;
pub use store::{EventStore, StyleTable};

use log::{debug, warn};

use crate::{
    parser::{
        self, DialogueEvent, ParseIssue, ParsedScript, ParserConfig, ScriptMetadata,
        StyleDefinition,
    },
    utils::CoreError,
};

/// Loaded script plus the configuration used to read and navigate it
#[derive(Debug, Clone, Default)]
pub struct SubtitleTimeline {
    parser_config: ParserConfig,
    navigation_config: NavigationConfig,
    script: ParsedScript,
    parsed: bool,
}

impl SubtitleTimeline {
    /// Empty timeline with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty timeline with explicit configuration
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] when a navigation tolerance is
    /// negative or not finite.
    pub fn with_config(
        parser_config: ParserConfig,
        navigation_config: NavigationConfig,
    ) -> Result<Self, CoreError> {
        navigation_config.validate()?;
        Ok(Self {
            parser_config,
            navigation_config,
            ..Self::default()
        })
    }

    /// Replace the current script with `text`
    ///
    /// Returns `false` when the parse failed as a whole; the timeline is
    /// then empty. Individual bad lines never fail a parse, see
    /// [`issues`](Self::issues).
    pub fn parse(&mut self, text: &str) -> bool {
        self.try_parse(text).is_ok()
    }

    /// Replace the current script with UTF-8 encoded `bytes`
    pub fn parse_bytes(&mut self, bytes: &[u8]) -> bool {
        self.try_parse_bytes(bytes).is_ok()
    }

    /// Like [`parse`](Self::parse) but reporting why a parse failed
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Parse`] when the script breaks a configured
    /// limit.
    pub fn try_parse(&mut self, text: &str) -> Result<ParseStatistics, CoreError> {
        self.reset();
        let result = parser::parse_script(text, &self.parser_config);
        self.install(result)
    }

    /// Like [`parse_bytes`](Self::parse_bytes) but reporting why a parse
    /// failed
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Parse`] for non-UTF-8 input or a broken limit.
    pub fn try_parse_bytes(&mut self, bytes: &[u8]) -> Result<ParseStatistics, CoreError> {
        self.reset();
        let result = parser::parse_script_bytes(bytes, &self.parser_config);
        self.install(result)
    }

    fn install(
        &mut self,
        result: Result<ParsedScript, parser::ParseError>,
    ) -> Result<ParseStatistics, CoreError> {
        match result {
            Ok(script) => {
                self.script = script;
                self.parsed = true;
                let stats = self.stats();
                debug!("timeline loaded: {stats}");
                Ok(stats)
            }
            Err(err) => {
                warn!("script rejected: {err}");
                Err(err.into())
            }
        }
    }

    /// Drop the loaded script
    pub fn reset(&mut self) {
        self.script = ParsedScript::default();
        self.parsed = false;
    }

    /// A parse succeeded and kept at least one event
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.parsed && !self.script.events.is_empty()
    }

    /// Every event showing at `t` seconds, in start order
    #[must_use]
    pub fn active_events_at(&self, t: f64) -> Vec<&DialogueEvent> {
        let events = &self.script.events;
        query::active_events(events.events(), events.max_duration(), t)
    }

    /// Events showing at `t`, grouped by track in first-appearance order
    #[must_use]
    pub fn active_events_by_track(&self, t: f64) -> TrackGroups<'_> {
        let events = &self.script.events;
        query::group_by_track(events.events(), events.max_duration(), t)
    }

    /// Tracks with at least one event, in first-appearance order
    #[must_use]
    pub fn available_tracks(&self) -> &[String] {
        self.script.events.tracks()
    }

    /// Style declared for `track`
    #[must_use]
    pub fn style_of(&self, track: &str) -> Option<&StyleDefinition> {
        self.script.styles.get(track)
    }

    /// All declared styles in declaration order
    #[must_use]
    pub fn styles(&self) -> &StyleTable {
        &self.script.styles
    }

    /// Counts describing the loaded script
    #[must_use]
    pub fn stats(&self) -> ParseStatistics {
        let mut stats = ParseStatistics::collect(
            &self.script.events,
            &self.script.styles,
            &self.script.issues,
        );
        stats.ready = self.is_ready();
        stats
    }

    /// Deduplicated, merged sentences of one track
    ///
    /// Without a track name the main track is used. An unknown track gives
    /// an empty list.
    #[must_use]
    pub fn navigable_events(&self, track: Option<&str>) -> Vec<NavigableEvent<'_>> {
        let events = &self.script.events;
        navigation::resolve_track(
            events.tracks(),
            track,
            &self.navigation_config.main_track_candidates,
        )
        .map(|resolved| {
            navigation::build_navigable(events.events(), resolved, &self.navigation_config)
        })
        .unwrap_or_default()
    }

    /// Start of the next sentence on the main track
    #[must_use]
    pub fn next_event_time(&self, t: f64) -> Option<f64> {
        self.next_event_time_on(t, None)
    }

    /// Start of the previous sentence on the main track
    #[must_use]
    pub fn prev_event_time(&self, t: f64) -> Option<f64> {
        self.prev_event_time_on(t, None)
    }

    /// Start of the next sentence on `track`, or the main track
    #[must_use]
    pub fn next_event_time_on(&self, t: f64, track: Option<&str>) -> Option<f64> {
        let navigable = self.navigable_events(track);
        navigation::next_boundary(&navigable, t, self.navigation_config.navigation_buffer)
    }

    /// Start of the previous sentence on `track`, or the main track
    #[must_use]
    pub fn prev_event_time_on(&self, t: f64, track: Option<&str>) -> Option<f64> {
        let navigable = self.navigable_events(track);
        navigation::prev_boundary(&navigable, t, self.navigation_config.navigation_buffer)
    }

    /// Merged sentence containing `t`, for looping one sentence
    #[must_use]
    pub fn navigable_event_at(&self, t: f64, track: Option<&str>) -> Option<NavigableEvent<'_>> {
        let navigable = self.navigable_events(track);
        navigation::event_covering(&navigable, t).cloned()
    }

    /// All events in start order
    #[must_use]
    pub fn all_events(&self) -> &[DialogueEvent] {
        self.script.events.events()
    }

    /// All events of one track, name matched as in
    /// [`navigable_events`](Self::navigable_events)
    #[must_use]
    pub fn events_on_track(&self, track: &str) -> Vec<&DialogueEvent> {
        let events = &self.script.events;
        navigation::resolve_track(events.tracks(), Some(track), &[])
            .map(|resolved| navigation::filter_track(events.events(), resolved))
            .unwrap_or_default()
    }

    /// Events whose clean text contains `needle`, ignoring case
    #[must_use]
    pub fn search(&self, needle: &str) -> Vec<&DialogueEvent> {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.all_events()
            .iter()
            .filter(|event| event.clean_text.to_lowercase().contains(&needle))
            .collect()
    }

    /// `[Script Info]` key/value pairs
    #[must_use]
    pub fn metadata(&self) -> &ScriptMetadata {
        &self.script.metadata
    }

    /// Lines and records skipped by the last parse
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.script.issues
    }

    /// Limits used when parsing
    #[must_use]
    pub fn parser_config(&self) -> &ParserConfig {
        &self.parser_config
    }

    /// Tolerances used when navigating
    #[must_use]
    pub fn navigation_config(&self) -> &NavigationConfig {
        &self.navigation_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "[Script Info]\n\
Title: Lesson 1\n\
\n\
[V4+ Styles]\n\
Format: Name, Fontname, Fontsize, PrimaryColour\n\
Style: Hanzi,Noto Sans CJK,48,&H0000FFFF\n\
Style: English,Arial,24,&H00FFFFFF\n\
\n\
[Events]\n\
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
Dialogue: 0,0:00:01.00,0:00:05.00,English,,0,0,0,,Hello, friend\n\
Dialogue: 0,0:00:01.00,0:00:05.00,Hanzi,,0,0,0,,你好，朋友\n\
Dialogue: 0,0:00:06.00,0:00:10.00,Hanzi,,0,0,0,,再见\n";

    #[test]
    fn fresh_timeline_is_empty() {
        let timeline = SubtitleTimeline::new();
        assert!(!timeline.is_ready());
        assert!(timeline.active_events_at(1.0).is_empty());
        assert!(timeline.navigable_events(None).is_empty());
        assert_eq!(timeline.next_event_time(0.0), None);
        assert!(!timeline.stats().ready);
    }

    #[test]
    fn main_track_drives_navigation() {
        let mut timeline = SubtitleTimeline::new();
        assert!(timeline.parse(SCRIPT));

        assert_eq!(timeline.available_tracks(), &["English", "Hanzi"]);
        assert_eq!(timeline.navigable_events(None).len(), 2);
        assert_eq!(timeline.next_event_time(2.0), Some(6.0));
        assert_eq!(timeline.next_event_time_on(2.0, Some("English")), None);
        assert_eq!(
            timeline.navigable_event_at(7.0, None).map(|e| e.text()),
            Some("再见")
        );
    }

    #[test]
    fn lookups() {
        let mut timeline = SubtitleTimeline::new();
        assert!(timeline.parse(SCRIPT));

        assert_eq!(timeline.metadata().title(), Some("Lesson 1"));
        assert_eq!(timeline.style_of("Hanzi").unwrap().display_color, "#FFFF00");
        assert_eq!(timeline.events_on_track("hanzi").len(), 2);
        assert!(timeline.events_on_track("French").is_empty());
        assert_eq!(timeline.search("FRIEND").len(), 1);
        assert!(timeline.search("  ").is_empty());
    }

    #[test]
    fn failed_parse_resets() {
        let mut timeline = SubtitleTimeline::with_config(
            ParserConfig::default().with_max_input_bytes(SCRIPT.len()),
            NavigationConfig::default(),
        )
        .unwrap();
        assert!(timeline.parse(SCRIPT));
        assert!(timeline.is_ready());

        let longer = format!("{SCRIPT}Dialogue: 0,0:00:11.00,0:00:12.00,Hanzi,,0,0,0,,多\n");
        let err = timeline.try_parse(&longer).unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
        assert!(!timeline.is_ready());
        assert!(timeline.all_events().is_empty());
        assert!(timeline.metadata().is_empty());
    }

    #[test]
    fn invalid_navigation_config_rejected() {
        let config = NavigationConfig::default().with_merge_gap_tolerance(f64::INFINITY);
        assert!(SubtitleTimeline::with_config(ParserConfig::default(), config).is_err());
    }
}
