//! Summary of a parsed timeline

use core::fmt;

use super::store::{EventStore, StyleTable};
use crate::parser::errors::{IssueSeverity, ParseIssue};

/// Counts describing the currently loaded script
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseStatistics {
    /// Number of tracks with at least one retained event
    pub track_count: usize,

    /// Those tracks in order of first appearance
    pub track_names: Vec<String>,

    /// Retained dialogue events
    pub total_events: usize,

    /// Latest end time of any event, in seconds
    pub max_end_time: f64,

    /// Whether queries will return data
    pub ready: bool,

    /// Declared styles
    pub style_count: usize,

    /// Lines and records skipped during the parse
    pub issue_count: usize,

    /// Issues of warning severity or above
    pub error_count: usize,
}

impl ParseStatistics {
    /// Summarize a store, its styles and the issues of the parse
    pub(crate) fn collect(events: &EventStore, styles: &StyleTable, issues: &[ParseIssue]) -> Self {
        Self {
            track_count: events.tracks().len(),
            track_names: events.tracks().to_vec(),
            total_events: events.len(),
            max_end_time: events.max_end_time(),
            ready: !events.is_empty(),
            style_count: styles.len(),
            issue_count: issues.len(),
            error_count: issues
                .iter()
                .filter(|issue| issue.severity >= IssueSeverity::Warning)
                .count(),
        }
    }

    /// Whether any issue above `Info` was recorded
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

impl fmt::Display for ParseStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} events on {} tracks ({}), {} styles, ends at {:.3}s, {} issues",
            self.total_events,
            self.track_count,
            self.track_names.join(", "),
            self.style_count,
            self.max_end_time,
            self.issue_count
        )
    }
}
