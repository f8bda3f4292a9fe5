//! Style table and event store
//!
//! Both are filled once per parse and read-only afterwards. The event
//! store is sorted by start time when the parse finishes, so queries never
//! sort.

use ahash::RandomState;
use std::collections::HashMap;

use crate::{
    parser::ast::{DialogueEvent, StyleDefinition},
    utils::{create_hash_map, fold_key},
};

/// Track definitions keyed by name
///
/// Keeps declaration order; a repeated name replaces the earlier
/// definition in place.
#[derive(Debug, Clone)]
pub struct StyleTable {
    styles: Vec<StyleDefinition>,
    index: HashMap<String, usize, RandomState>,
    /// First slot for each case-folded name
    folded: HashMap<String, usize, RandomState>,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            styles: Vec::new(),
            index: create_hash_map(),
            folded: create_hash_map(),
        }
    }
}

impl StyleTable {
    /// Empty style table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a style, replacing any style of the same name
    ///
    /// Returns `true` when an earlier definition was replaced.
    pub fn insert(&mut self, style: StyleDefinition) -> bool {
        if let Some(&slot) = self.index.get(&style.name) {
            self.styles[slot] = style;
            true
        } else {
            let slot = self.styles.len();
            self.index.insert(style.name.clone(), slot);
            self.folded.entry(fold_key(&style.name)).or_insert(slot);
            self.styles.push(style);
            false
        }
    }

    /// Look up a style by exact name, then ignoring ASCII case
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StyleDefinition> {
        self.index
            .get(name)
            .or_else(|| self.folded.get(&fold_key(name)))
            .map(|&slot| &self.styles[slot])
    }

    /// Styles in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &StyleDefinition> {
        self.styles.iter()
    }

    /// Number of declared styles
    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether no style was declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Retained dialogue events plus per-track bookkeeping
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<DialogueEvent>,
    tracks: Vec<String>,
    max_duration: f64,
}

impl EventStore {
    /// Empty event store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event in script order
    pub fn push(&mut self, event: DialogueEvent) {
        if !self.tracks.iter().any(|track| *track == event.track) {
            self.tracks.push(event.track.clone());
        }
        self.max_duration = self.max_duration.max(event.duration());
        self.events.push(event);
    }

    /// Sort by start time, keeping script order among equal starts
    pub fn finish(&mut self) {
        self.events.sort_by(|a, b| a.start.total_cmp(&b.start));
    }

    /// Events in ascending start order (after [`finish`](Self::finish))
    #[must_use]
    pub fn events(&self) -> &[DialogueEvent] {
        &self.events
    }

    /// Track names in order of first appearance in the script
    #[must_use]
    pub fn tracks(&self) -> &[String] {
        &self.tracks
    }

    /// Longest event duration, zero when empty
    #[must_use]
    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    /// Latest end time of any event
    #[must_use]
    pub fn max_end_time(&self) -> f64 {
        self.events
            .iter()
            .map(|event| event.end)
            .fold(0.0, f64::max)
    }

    /// Number of stored events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no event was stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
