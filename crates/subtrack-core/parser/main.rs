//! Main parser coordination and dispatch logic
//!
//! Splits the script into trimmed lines, tracks the current section and
//! forwards data lines to the matching section handler.

use log::{debug, trace};

use super::{
    errors::{IssueCategory, ParseError, ParseIssue},
    sections::{EventsHandler, ScriptInfoHandler, SectionHandler, SectionKind, StylesHandler},
    ParsedScript, ParserConfig,
};
use crate::utils::{split_lines, strip_bom};

/// Where data lines currently go
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    /// Before the first section header
    Preamble,
    /// Inside a section the parser handles
    Known(SectionKind),
    /// Inside a section nobody handles
    Ignored,
}

/// Internal parser state for one parse call
pub(super) struct Parser<'a> {
    /// Source text being parsed
    source: &'a str,
    /// Limits and defaults
    config: &'a ParserConfig,
    /// Section receiving data lines
    cursor: Cursor,
    script_info: ScriptInfoHandler,
    styles: StylesHandler<'a>,
    events: EventsHandler<'a>,
    /// Parse issues and warnings
    issues: Vec<ParseIssue>,
}

impl<'a> Parser<'a> {
    /// Create new parser for source text
    pub fn new(source: &'a str, config: &'a ParserConfig) -> Self {
        Self {
            source,
            config,
            cursor: Cursor::Preamble,
            script_info: ScriptInfoHandler::new(),
            styles: StylesHandler::new(),
            events: EventsHandler::new(&config.default_track),
            issues: Vec::new(),
        }
    }

    /// Parse complete script
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the input breaks a configured limit.
    pub fn parse(mut self) -> Result<ParsedScript, ParseError> {
        if self.source.len() > self.config.max_input_bytes {
            return Err(ParseError::InputTooLarge {
                size: self.source.len(),
                limit: self.config.max_input_bytes,
            });
        }

        let (source, had_bom) = strip_bom(self.source);
        if had_bom {
            trace!("stripped byte order mark");
        }

        for (index, raw_line) in split_lines(source).enumerate() {
            if index >= self.config.max_lines {
                return Err(ParseError::TooManyLines {
                    limit: self.config.max_lines,
                });
            }
            self.process_line(raw_line.trim(), index + 1);
        }

        let styles = self.styles.finish();
        let events = self.events.finish();
        debug!(
            "parsed {} styles, {} events on {} tracks ({} issues)",
            styles.len(),
            events.len(),
            events.tracks().len(),
            self.issues.len()
        );

        Ok(ParsedScript {
            metadata: self.script_info.finish(),
            styles,
            events,
            issues: self.issues,
        })
    }

    /// Route one trimmed line
    fn process_line(&mut self, line: &'a str, line_number: usize) {
        if line.is_empty() || line.starts_with(';') || line.starts_with('!') {
            return;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            self.enter_section(name, line_number);
            return;
        }

        match self.cursor {
            Cursor::Known(SectionKind::ScriptInfo) => {
                self.script_info
                    .handle_line(line, line_number, &mut self.issues);
            }
            Cursor::Known(SectionKind::Styles) => {
                self.styles.handle_line(line, line_number, &mut self.issues);
            }
            Cursor::Known(SectionKind::Events) => {
                self.events.handle_line(line, line_number, &mut self.issues);
            }
            Cursor::Ignored => {
                trace!("line {line_number}: inside ignored section");
            }
            Cursor::Preamble => {
                trace!("line {line_number}: data before first section");
                self.issues.push(ParseIssue::warning(
                    IssueCategory::Structure,
                    "Line outside of any section".into(),
                    line_number,
                ));
            }
        }
    }

    /// Switch the current section
    fn enter_section(&mut self, name: &str, line_number: usize) {
        if let Some(kind) = SectionKind::from_header(name) {
            debug!("line {line_number}: entering section {kind:?}");
            self.cursor = Cursor::Known(kind);
        } else {
            debug!("line {line_number}: ignoring section [{name}]");
            self.cursor = Cursor::Ignored;
            self.issues.push(ParseIssue::info(
                IssueCategory::Structure,
                format!("Unknown section '[{name}]' ignored"),
                line_number,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<ParsedScript, ParseError> {
        let config = ParserConfig::default();
        Parser::new(source, &config).parse()
    }

    #[test]
    fn routes_lines_to_sections() {
        let script = parse(
            "\u{FEFF}[Script Info]\r\nTitle: Lesson\r\n\r\n[V4+ Styles]\r\nFormat: Name, Fontsize\r\nStyle: Hanzi,40\r\n\r\n[Events]\r\nFormat: Start, End, Style, Text\r\nDialogue: 0:00:01.00,0:00:02.00,Hanzi,你好\r\n",
        )
        .unwrap();

        assert_eq!(script.metadata.title(), Some("Lesson"));
        assert_eq!(script.styles.len(), 1);
        assert_eq!(script.events.len(), 1);
        assert!(script.issues.is_empty());
    }

    #[test]
    fn comments_and_unknown_sections_are_skipped() {
        let script = parse(
            "; leading comment\n[Fonts]\nfontname: x.ttf\nDialogue: 0,0:00:01.00,0:00:02.00,A,,0,0,0,,hidden\n[events]\n! another comment\nDialogue: 0,0:00:01.00,0:00:02.00,A,,0,0,0,,shown\n",
        )
        .unwrap();

        assert_eq!(script.events.len(), 1);
        assert_eq!(script.events.events()[0].clean_text, "shown");
        assert_eq!(script.issues.len(), 1);
        assert_eq!(script.issues[0].category, IssueCategory::Structure);
    }

    #[test]
    fn carriage_return_only_line_endings() {
        let script = parse(
            "[Script Info]\rTitle: Mac\r[Events]\rFormat: Start, End, Style, Text\rDialogue: 0:00:01.00,0:00:02.00,Hanzi,你好\rDialogue: 0:00:03.00,0:00:04.00,Hanzi,再见\r",
        )
        .unwrap();

        assert_eq!(script.metadata.title(), Some("Mac"));
        assert_eq!(script.events.len(), 2);
        assert_eq!(script.events.events()[1].line, 6);
        assert!(script.issues.is_empty());
    }

    #[test]
    fn data_before_any_section_is_reported() {
        let script = parse("Dialogue: 0,0:00:01.00,0:00:02.00,A,,0,0,0,,lost\n").unwrap();
        assert!(script.events.is_empty());
        assert_eq!(script.issues.len(), 1);
    }

    #[test]
    fn limits_abort_parse() {
        let config = ParserConfig::default().with_max_input_bytes(8);
        let err = Parser::new("[Events]\nlong enough", &config).parse().unwrap_err();
        assert_eq!(err, ParseError::InputTooLarge { size: 20, limit: 8 });

        let config = ParserConfig::default().with_max_lines(2);
        let err = Parser::new("a\nb\nc\n", &config).parse().unwrap_err();
        assert_eq!(err, ParseError::TooManyLines { limit: 2 });
    }
}
