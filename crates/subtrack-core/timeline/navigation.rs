//! Navigable events and sentence navigation
//!
//! Navigation works on one track at a time. The pipeline is:
//!
//! 1. resolve the track (explicit name, or the main track),
//! 2. keep only that track's events with text and a positive duration,
//! 3. drop events starting within `dedup_epsilon` of the last kept start,
//! 4. merge runs of identical normalized text separated by at most
//!    `merge_gap_tolerance`.
//!
//! The result is recomputed per call and borrows from the event store.

use log::trace;

use super::config::NavigationConfig;
use crate::parser::ast::DialogueEvent;

/// A sentence as seen by navigation: possibly several merged events
#[derive(Debug, Clone, PartialEq)]
pub struct NavigableEvent<'a> {
    /// Start of the first merged event
    pub start: f64,
    /// Latest end of all merged events
    pub end: f64,
    /// First event of the merged run
    pub event: &'a DialogueEvent,
    /// Number of source events folded into this one
    pub merged_count: usize,
}

impl<'a> NavigableEvent<'a> {
    fn from_event(event: &'a DialogueEvent) -> Self {
        Self {
            start: event.start,
            end: event.end,
            event,
            merged_count: 1,
        }
    }

    /// Track the event belongs to
    #[must_use]
    pub fn track(&self) -> &'a str {
        &self.event.track
    }

    /// Clean text of the first merged event
    #[must_use]
    pub fn text(&self) -> &'a str {
        &self.event.clean_text
    }

    /// Length of the merged span in seconds
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `t` lies in the merged span `[start, end)`
    ///
    /// A sentence ending exactly where the next begins does not contain
    /// the shared instant.
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        (self.start..self.end).contains(&t)
    }
}

/// Pick the track navigation runs on
///
/// A requested name matches exactly first, then ignoring ASCII case; an
/// unknown name resolves to `None`. Without a request the first candidate
/// present wins, falling back to the first track of the script.
#[must_use]
pub fn resolve_track<'t>(
    tracks: &'t [String],
    requested: Option<&str>,
    candidates: &[String],
) -> Option<&'t str> {
    match requested {
        Some(name) => tracks
            .iter()
            .find(|track| *track == name)
            .or_else(|| tracks.iter().find(|track| track.eq_ignore_ascii_case(name)))
            .map(String::as_str),
        None => resolve_main_track(tracks, candidates),
    }
}

/// First candidate found among `tracks`, else the first track
#[must_use]
pub fn resolve_main_track<'t>(tracks: &'t [String], candidates: &[String]) -> Option<&'t str> {
    candidates
        .iter()
        .find_map(|candidate| {
            tracks
                .iter()
                .find(|track| track.eq_ignore_ascii_case(candidate))
        })
        .or_else(|| tracks.first())
        .map(String::as_str)
}

/// Events of exactly `track`, in store order
#[must_use]
pub fn filter_track<'a>(events: &'a [DialogueEvent], track: &str) -> Vec<&'a DialogueEvent> {
    events.iter().filter(|event| event.track == track).collect()
}

/// Whether an event can be navigated to: positive duration, non-blank text
#[must_use]
pub fn is_navigable(event: &DialogueEvent) -> bool {
    event.end > event.start && !normalize_text(&event.clean_text).is_empty()
}

/// Drop events starting within `epsilon` of the previously kept start
#[must_use]
pub fn dedup_by_start<'a>(events: &[&'a DialogueEvent], epsilon: f64) -> Vec<&'a DialogueEvent> {
    let mut kept: Vec<&'a DialogueEvent> = Vec::with_capacity(events.len());
    for &event in events {
        match kept.last() {
            Some(last) if (event.start - last.start).abs() < epsilon => {
                trace!("line {}: duplicate start {:.3}s dropped", event.line, event.start);
            }
            _ => kept.push(event),
        }
    }
    kept
}

/// Comparison key for merging: whitespace collapsed, trimmed, lowercased
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Fold consecutive events with the same normalized text
///
/// Events failing [`is_navigable`] are skipped. Two neighbours merge when
/// their keys match and the gap between them (negative for overlaps) is
/// at most `gap_tolerance`.
#[must_use]
pub fn merge_adjacent<'a>(
    events: &[&'a DialogueEvent],
    gap_tolerance: f64,
) -> Vec<NavigableEvent<'a>> {
    let mut merged: Vec<NavigableEvent<'a>> = Vec::with_capacity(events.len());
    let mut last_key = String::new();

    for &event in events.iter().filter(|event| is_navigable(event)) {
        let key = normalize_text(&event.clean_text);

        if let Some(last) = merged.last_mut() {
            if key == last_key && event.start - last.end <= gap_tolerance {
                last.end = last.end.max(event.end);
                last.merged_count += 1;
                continue;
            }
        }

        merged.push(NavigableEvent::from_event(event));
        last_key = key;
    }

    merged
}

/// Full pipeline for one resolved track
///
/// Degenerate events are removed before dedup so they never shadow a real
/// sentence with the same start.
#[must_use]
pub fn build_navigable<'a>(
    events: &'a [DialogueEvent],
    track: &str,
    config: &NavigationConfig,
) -> Vec<NavigableEvent<'a>> {
    let mut filtered = filter_track(events, track);
    filtered.retain(|event| is_navigable(event));
    let deduped = dedup_by_start(&filtered, config.dedup_epsilon);
    merge_adjacent(&deduped, config.merge_gap_tolerance)
}

/// Start of the first event beginning more than `buffer` after `t`
#[must_use]
pub fn next_boundary(events: &[NavigableEvent<'_>], t: f64, buffer: f64) -> Option<f64> {
    if t.is_nan() {
        return None;
    }
    let index = events.partition_point(|event| event.start - t <= buffer);
    events.get(index).map(|event| event.start)
}

/// Start of the last event beginning more than `buffer` before the anchor
///
/// The anchor is the start of the earliest event containing `t`, or `t`
/// itself between events, so stepping back from inside a sentence lands on
/// the sentence before it rather than on its own start. Spans are half-open,
/// so at a shared boundary the anchor is the sentence that begins there.
#[must_use]
pub fn prev_boundary(events: &[NavigableEvent<'_>], t: f64, buffer: f64) -> Option<f64> {
    if t.is_nan() {
        return None;
    }
    let anchor = event_covering(events, t).map_or(t, |event| event.start);

    events
        .iter()
        .rev()
        .find(|event| event.start < anchor - buffer)
        .map(|event| event.start)
}

/// Earliest navigable event with `start <= t < end`
#[must_use]
pub fn event_covering<'e, 'a>(
    events: &'e [NavigableEvent<'a>],
    t: f64,
) -> Option<&'e NavigableEvent<'a>> {
    events
        .iter()
        .take_while(|event| event.start <= t)
        .find(|event| event.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::format::{FieldFormat, DEFAULT_EVENT_FORMAT};
    use pretty_assertions::assert_eq;

    fn event(track: &str, start: &str, end: &str, text: &str) -> DialogueEvent {
        let format = FieldFormat::from_names(DEFAULT_EVENT_FORMAT);
        let line = format!("0,{start},{end},{track},,0,0,0,,{text}");
        DialogueEvent::from_record(&format.decode_bounded(&line), "Default", 1).unwrap()
    }

    fn spans(events: &[NavigableEvent<'_>]) -> Vec<(f64, f64)> {
        events.iter().map(|e| (e.start, e.end)).collect()
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn main_track_prefers_candidates() {
        let candidates = names(&["Hanzi", "Chinese", "Main", "Default"]);

        let tracks = names(&["English", "hanzi", "Pinyin"]);
        assert_eq!(resolve_main_track(&tracks, &candidates), Some("hanzi"));

        let tracks = names(&["English", "Pinyin"]);
        assert_eq!(resolve_main_track(&tracks, &candidates), Some("English"));

        assert_eq!(resolve_main_track(&[], &candidates), None);
    }

    #[test]
    fn requested_track_resolution() {
        let candidates = names(&["Hanzi"]);
        let tracks = names(&["Hanzi", "English"]);

        assert_eq!(resolve_track(&tracks, Some("english"), &candidates), Some("English"));
        assert_eq!(resolve_track(&tracks, Some("French"), &candidates), None);
        assert_eq!(resolve_track(&tracks, None, &candidates), Some("Hanzi"));
    }

    #[test]
    fn dedup_collapses_same_instant() {
        let events = [
            event("A", "0:00:01.000", "0:00:02.00", "one"),
            event("A", "0:00:01.000", "0:00:02.00", "one again"),
            event("A", "0:00:01.002", "0:00:02.00", "close"),
        ];
        let refs: Vec<_> = events.iter().collect();

        let kept = dedup_by_start(&refs, 0.001);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].clean_text, "one");
        assert_eq!(dedup_by_start(&kept, 0.001), kept);
    }

    #[test]
    fn merge_joins_fragments_of_one_sentence() {
        let events = [
            event("Hanzi", "0:00:02.00", "0:00:02.14", "你好"),
            event("Hanzi", "0:00:02.15", "0:00:03.00", "你好"),
        ];
        let refs: Vec<_> = events.iter().collect();

        let merged = merge_adjacent(&refs, 0.18);
        assert_eq!(spans(&merged), vec![(2.0, 3.0)]);
        assert_eq!(merged[0].merged_count, 2);
    }

    #[test]
    fn merge_respects_text_and_gap() {
        let events = [
            event("A", "0:00:01.00", "0:00:02.00", "Hello  World"),
            event("A", "0:00:02.10", "0:00:03.00", "hello world"),
            event("A", "0:00:03.50", "0:00:04.00", "hello world"),
            event("A", "0:00:04.00", "0:00:05.00", "different"),
            event("A", "0:00:06.00", "0:00:06.00", "zero length"),
        ];
        let refs: Vec<_> = events.iter().collect();

        let merged = merge_adjacent(&refs, 0.18);
        assert_eq!(spans(&merged), vec![(1.0, 3.0), (3.5, 4.0), (4.0, 5.0)]);
    }

    #[test]
    fn pipeline_ignores_other_tracks() {
        let events = [
            event("Hanzi", "0:00:01.00", "0:00:02.00", "你好"),
            event("English", "0:00:02.05", "0:00:02.50", "hello"),
            event("Hanzi", "0:00:02.10", "0:00:03.00", "你好"),
        ];
        let merged = build_navigable(&events, "Hanzi", &NavigationConfig::default());
        assert_eq!(spans(&merged), vec![(1.0, 3.0)]);
    }

    #[test]
    fn next_and_prev_boundaries() {
        let events = [
            event("Hanzi", "0:00:01.00", "0:00:05.00", "一"),
            event("Hanzi", "0:00:06.00", "0:00:10.00", "二"),
            event("Hanzi", "0:00:11.00", "0:00:15.00", "三"),
        ];
        let nav = build_navigable(&events, "Hanzi", &NavigationConfig::default());

        assert_eq!(next_boundary(&nav, 2.5, 0.05), Some(6.0));
        assert_eq!(next_boundary(&nav, 5.97, 0.05), Some(11.0));
        assert_eq!(next_boundary(&nav, 11.0, 0.05), None);
        assert_eq!(next_boundary(&nav, 0.0, 0.05), Some(1.0));

        assert_eq!(prev_boundary(&nav, 2.5, 0.05), None);
        assert_eq!(prev_boundary(&nav, 7.0, 0.05), Some(1.0));
        assert_eq!(prev_boundary(&nav, 5.5, 0.05), Some(1.0));
        assert_eq!(prev_boundary(&nav, 20.0, 0.05), Some(11.0));
        assert_eq!(prev_boundary(&nav, f64::NAN, 0.05), None);
    }

    #[test]
    fn degenerate_duplicate_does_not_hide_sentence() {
        let events = [
            event("Hanzi", "0:00:01.00", "0:00:01.00", "你好"),
            event("Hanzi", "0:00:01.00", "0:00:04.00", "你好"),
            event("Hanzi", "0:00:06.00", "0:00:08.00", "再见"),
        ];
        let nav = build_navigable(&events, "Hanzi", &NavigationConfig::default());

        assert_eq!(spans(&nav), vec![(1.0, 4.0), (6.0, 8.0)]);
        assert_eq!(next_boundary(&nav, 0.0, 0.05), Some(1.0));
    }

    #[test]
    fn touching_sentences_step_back_one_at_a_time() {
        let events = [
            event("Hanzi", "0:00:01.00", "0:00:05.00", "一"),
            event("Hanzi", "0:00:05.00", "0:00:09.00", "二"),
            event("Hanzi", "0:00:09.00", "0:00:13.00", "三"),
        ];
        let nav = build_navigable(&events, "Hanzi", &NavigationConfig::default());

        let next = next_boundary(&nav, 2.0, 0.05);
        assert_eq!(next, Some(5.0));
        assert_eq!(prev_boundary(&nav, 5.0, 0.05), Some(1.0));
        assert_eq!(prev_boundary(&nav, 9.0, 0.05), Some(5.0));
        assert_eq!(prev_boundary(&nav, 10.0, 0.05), Some(5.0));
        assert_eq!(event_covering(&nav, 5.0).map(NavigableEvent::text), Some("二"));
        assert_eq!(event_covering(&nav, 13.0), None);
    }

    #[test]
    fn covering_event() {
        let events = [
            event("A", "0:00:01.00", "0:00:05.00", "one"),
            event("A", "0:00:06.00", "0:00:10.00", "two"),
        ];
        let nav = build_navigable(&events, "A", &NavigationConfig::default());

        assert_eq!(event_covering(&nav, 7.0).map(NavigableEvent::text), Some("two"));
        assert!(event_covering(&nav, 5.5).is_none());
    }
}
