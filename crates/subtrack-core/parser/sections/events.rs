//! `[Events]` handler
//!
//! Decodes `Dialogue:` lines with the bounded strategy so commas in the
//! text survive, and keeps every event that passes the retention rules.
//! Other event kinds (`Comment:`, `Picture:`, ...) are skipped.

use log::trace;

use super::{split_label, SectionHandler};
use crate::{
    parser::{
        ast::{DialogueEvent, EventRejection},
        errors::{IssueCategory, ParseIssue},
        format::{FieldFormat, DEFAULT_EVENT_FORMAT, TEXT_KEYS},
    },
    timeline::store::EventStore,
};

/// Event kinds that are recognized but never displayed
const SKIPPED_KINDS: &[&str] = &["Comment", "Picture", "Sound", "Movie", "Command"];

/// Handler for event lines
#[derive(Debug)]
pub struct EventsHandler<'a> {
    format: FieldFormat<'a>,
    store: EventStore,
    default_track: &'a str,
}

impl<'a> EventsHandler<'a> {
    /// Create a handler assigning style-less lines to `default_track`
    #[must_use]
    pub fn new(default_track: &'a str) -> Self {
        Self {
            format: FieldFormat::from_names(DEFAULT_EVENT_FORMAT),
            store: EventStore::new(),
            default_track,
        }
    }

    /// Sort and hand over the collected events
    #[must_use]
    pub fn finish(mut self) -> EventStore {
        self.store.finish();
        self.store
    }
}

impl<'a> SectionHandler<'a> for EventsHandler<'a> {
    fn handle_line(&mut self, line: &'a str, line_number: usize, issues: &mut Vec<ParseIssue>) {
        let Some((label, payload)) = split_label(line) else {
            trace!("line {line_number}: unlabeled line in events section");
            issues.push(ParseIssue::warning(
                IssueCategory::Format,
                "Event section line has no label".into(),
                line_number,
            ));
            return;
        };

        if label.eq_ignore_ascii_case("Format") {
            self.format = FieldFormat::parse_declaration(line);
            if !self.format.declares_any(TEXT_KEYS) {
                issues.push(ParseIssue::warning(
                    IssueCategory::Format,
                    "Events format declares no Text field".into(),
                    line_number,
                ));
            }
            return;
        }

        if !label.eq_ignore_ascii_case("Dialogue") {
            let issue = if SKIPPED_KINDS.iter().any(|kind| label.eq_ignore_ascii_case(kind)) {
                ParseIssue::info(
                    IssueCategory::Event,
                    format!("'{label}' event skipped"),
                    line_number,
                )
            } else {
                ParseIssue::warning(
                    IssueCategory::Format,
                    format!("Unknown event type '{label}'"),
                    line_number,
                )
            };
            trace!("line {line_number}: {}", issue.message);
            issues.push(issue);
            return;
        }

        let record = self.format.decode_bounded(payload);
        match DialogueEvent::from_record(&record, self.default_track, line_number) {
            Ok(event) => self.store.push(event),
            Err(rejection) => {
                trace!("line {line_number}: dialogue dropped ({rejection:?})");
                issues.push(rejection_issue(&rejection, line_number));
            }
        }
    }
}

fn rejection_issue(rejection: &EventRejection, line_number: usize) -> ParseIssue {
    match rejection {
        EventRejection::InvalidStart(raw) => ParseIssue::warning(
            IssueCategory::Timing,
            format!("Invalid start time '{raw}'"),
            line_number,
        ),
        EventRejection::InvalidEnd(raw) => ParseIssue::warning(
            IssueCategory::Timing,
            format!("Invalid end time '{raw}'"),
            line_number,
        ),
        EventRejection::EmptyText => ParseIssue::error(
            IssueCategory::Event,
            "Dialogue has no text after markup removal".into(),
            line_number,
        ),
    }
}
