//! Temporal queries over the sorted event store
//!
//! Events are sorted by start time and no event lasts longer than the
//! store's maximum duration, so every event active at `t` starts inside
//! `[t - max_duration, t]`. Two binary searches bound that window and only
//! the events inside it are inspected.

use crate::parser::ast::DialogueEvent;

/// Widens the search window to absorb rounding in `end - start`
const WINDOW_SLACK: f64 = 1e-6;

/// Every event with `start <= t <= end`, in start order
///
/// `events` must be sorted by start time and `max_duration` must be at
/// least the longest event duration. A NaN time matches nothing.
#[must_use]
pub fn active_events(events: &[DialogueEvent], max_duration: f64, t: f64) -> Vec<&DialogueEvent> {
    if t.is_nan() || events.is_empty() {
        return Vec::new();
    }

    let earliest = t - max_duration.max(0.0) - WINDOW_SLACK;
    let lo = events.partition_point(|event| event.start < earliest);
    let hi = events.partition_point(|event| event.start <= t);

    events
        .get(lo..hi)
        .unwrap_or_default()
        .iter()
        .filter(|event| event.is_active_at(t))
        .collect()
}

/// Events grouped by track, tracks in order of first appearance
///
/// Behaves as an insertion-ordered map; lookups are linear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackGroups<'a> {
    groups: Vec<(&'a str, Vec<&'a DialogueEvent>)>,
}

impl<'a> TrackGroups<'a> {
    /// Group `events`, keeping their relative order inside each track
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a DialogueEvent>,
    {
        let mut groups: Vec<(&'a str, Vec<&'a DialogueEvent>)> = Vec::new();
        for event in events {
            match groups.iter_mut().find(|(track, _)| *track == event.track) {
                Some((_, bucket)) => bucket.push(event),
                None => groups.push((event.track.as_str(), vec![event])),
            }
        }
        Self { groups }
    }

    /// Events of one track, `None` when the track has no active events
    #[must_use]
    pub fn get(&self, track: &str) -> Option<&[&'a DialogueEvent]> {
        self.groups
            .iter()
            .find(|(name, _)| *name == track)
            .map(|(_, bucket)| bucket.as_slice())
    }

    /// Track names in first-appearance order
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.iter().map(|(name, _)| *name)
    }

    /// Tracks and their events in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a DialogueEvent])> {
        self.groups
            .iter()
            .map(|(name, bucket)| (*name, bucket.as_slice()))
    }

    /// Number of tracks
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no track has active events
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for TrackGroups<'a> {
    type Item = (&'a str, Vec<&'a DialogueEvent>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Active events at `t` grouped by track
#[must_use]
pub fn group_by_track(events: &[DialogueEvent], max_duration: f64, t: f64) -> TrackGroups<'_> {
    TrackGroups::from_events(active_events(events, max_duration, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::format::{FieldFormat, DEFAULT_EVENT_FORMAT};
    use crate::timeline::store::EventStore;

    fn store(rows: &[(&str, &str, &str, &str)]) -> EventStore {
        let format = FieldFormat::from_names(DEFAULT_EVENT_FORMAT);
        let mut store = EventStore::new();
        for (i, (track, start, end, text)) in rows.iter().enumerate() {
            let line = format!("0,{start},{end},{track},,0,0,0,,{text}");
            let record = format.decode_bounded(&line);
            store.push(DialogueEvent::from_record(&record, "Default", i + 1).unwrap());
        }
        store.finish();
        store
    }

    fn texts(events: &[&DialogueEvent]) -> Vec<String> {
        events.iter().map(|e| e.clean_text.clone()).collect()
    }

    #[test]
    fn boundaries_are_inclusive() {
        let store = store(&[
            ("A", "0:00:01.00", "0:00:05.00", "one"),
            ("A", "0:00:05.00", "0:00:07.00", "two"),
        ]);
        let at = |t| texts(&active_events(store.events(), store.max_duration(), t));

        assert_eq!(at(1.0), vec!["one"]);
        assert_eq!(at(5.0), vec!["one", "two"]);
        assert_eq!(at(7.0), vec!["two"]);
        assert!(at(0.99).is_empty());
        assert!(at(7.01).is_empty());
        assert!(at(f64::NAN).is_empty());
    }

    #[test]
    fn long_event_found_behind_short_ones() {
        let store = store(&[
            ("Sign", "0:00:00.00", "0:01:00.00", "banner"),
            ("A", "0:00:10.00", "0:00:11.00", "a"),
            ("A", "0:00:20.00", "0:00:21.00", "b"),
            ("A", "0:00:30.00", "0:00:31.00", "c"),
        ]);
        let active = active_events(store.events(), store.max_duration(), 30.5);
        assert_eq!(texts(&active), vec!["banner", "c"]);
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let store = store(&[
            ("Pinyin", "0:00:01.00", "0:00:05.00", "ni hao"),
            ("Hanzi", "0:00:01.00", "0:00:05.00", "你好"),
            ("Pinyin", "0:00:02.00", "0:00:04.00", "ma"),
            ("English", "0:00:01.00", "0:00:05.00", "hello"),
        ]);
        let groups = group_by_track(store.events(), store.max_duration(), 3.0);

        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["Pinyin", "Hanzi", "English"]);
        assert_eq!(groups.get("Pinyin").map(<[_]>::len), Some(2));
        assert!(groups.get("Missing").is_none());
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn empty_store_has_no_groups() {
        let store = EventStore::new();
        assert!(group_by_track(store.events(), store.max_duration(), 1.0).is_empty());
    }
}
