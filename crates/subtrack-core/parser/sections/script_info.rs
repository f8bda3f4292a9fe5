//! `[Script Info]` handler
//!
//! Collects `Key: Value` pairs into [`ScriptMetadata`].

use log::trace;

use super::{split_label, SectionHandler};
use crate::parser::{
    ast::ScriptMetadata,
    errors::{IssueCategory, ParseIssue},
};

/// Handler for header metadata lines
#[derive(Debug, Default)]
pub struct ScriptInfoHandler {
    metadata: ScriptMetadata,
}

impl ScriptInfoHandler {
    /// Handler with no keys collected yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand over the collected metadata
    #[must_use]
    pub fn finish(self) -> ScriptMetadata {
        self.metadata
    }
}

impl<'a> SectionHandler<'a> for ScriptInfoHandler {
    fn handle_line(&mut self, line: &'a str, line_number: usize, issues: &mut Vec<ParseIssue>) {
        match split_label(line) {
            Some((key, value)) if !key.is_empty() => {
                self.metadata.insert(key, value.trim());
            }
            _ => {
                trace!("line {line_number}: skipping script info line without key");
                issues.push(ParseIssue::warning(
                    IssueCategory::Format,
                    "Invalid script info line format".into(),
                    line_number,
                ));
            }
        }
    }
}
