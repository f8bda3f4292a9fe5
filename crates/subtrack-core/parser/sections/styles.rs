//! `[V4+ Styles]` handler
//!
//! Decodes `Style:` lines positionally against the section's `Format:`
//! declaration (or the standard column order when none was given) and
//! fills the [`StyleTable`].

use log::trace;

use super::{split_label, SectionHandler};
use crate::{
    parser::{
        ast::StyleDefinition,
        errors::{IssueCategory, ParseIssue},
        format::{FieldFormat, DEFAULT_STYLE_FORMAT},
    },
    timeline::store::StyleTable,
};

/// Handler for style definition lines
#[derive(Debug)]
pub struct StylesHandler<'a> {
    format: FieldFormat<'a>,
    table: StyleTable,
}

impl Default for StylesHandler<'_> {
    fn default() -> Self {
        Self {
            format: FieldFormat::from_names(DEFAULT_STYLE_FORMAT),
            table: StyleTable::new(),
        }
    }
}

impl StylesHandler<'_> {
    /// Handler expecting the default style format
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand over the filled style table
    #[must_use]
    pub fn finish(self) -> StyleTable {
        self.table
    }
}

impl<'a> SectionHandler<'a> for StylesHandler<'a> {
    fn handle_line(&mut self, line: &'a str, line_number: usize, issues: &mut Vec<ParseIssue>) {
        let Some((label, payload)) = split_label(line) else {
            trace!("line {line_number}: unlabeled line in styles section");
            issues.push(ParseIssue::warning(
                IssueCategory::Format,
                "Style section line has no label".into(),
                line_number,
            ));
            return;
        };

        if label.eq_ignore_ascii_case("Format") {
            self.format = FieldFormat::parse_declaration(line);
        } else if label.eq_ignore_ascii_case("Style") {
            let record = self.format.decode_positional(payload);
            match StyleDefinition::from_record(&record) {
                Some(style) => {
                    let name = style.name.clone();
                    if self.table.insert(style) {
                        issues.push(ParseIssue::info(
                            IssueCategory::Style,
                            format!("Style '{name}' redefined, later definition kept"),
                            line_number,
                        ));
                    }
                }
                None => {
                    trace!("line {line_number}: style without name");
                    issues.push(ParseIssue::error(
                        IssueCategory::Style,
                        "Style line has no name".into(),
                        line_number,
                    ));
                }
            }
        } else {
            trace!("line {line_number}: ignoring '{label}' in styles section");
            issues.push(ParseIssue::info(
                IssueCategory::Format,
                format!("Unsupported line '{label}' in styles section"),
                line_number,
            ));
        }
    }
}
