//! Section handlers for ASS script components
//!
//! The router in [`main`](crate::parser::main) owns one handler per known
//! section and forwards each data line to the handler of the section it
//! appears in. Handlers never fail: a line they cannot interpret is
//! recorded as a [`ParseIssue`] and skipped.

pub mod events;
pub mod script_info;
pub mod styles;

pub use events::EventsHandler;
pub use script_info::ScriptInfoHandler;
pub use styles::StylesHandler;

use crate::parser::errors::ParseIssue;

/// Sections the router knows how to handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// `[Script Info]` header metadata
    ScriptInfo,
    /// `[V4+ Styles]`, `[V4 Styles]` or `[V4++ Styles]`
    Styles,
    /// `[Events]`
    Events,
}

impl SectionKind {
    /// Resolve a bracketed section name, ignoring case and spacing
    ///
    /// ```rust
    /// # use subtrack_core::parser::sections::SectionKind;
    /// assert_eq!(SectionKind::from_header(" v4+ styles "), Some(SectionKind::Styles));
    /// assert_eq!(SectionKind::from_header("Fonts"), None);
    /// ```
    #[must_use]
    pub fn from_header(name: &str) -> Option<Self> {
        let normalized: String = name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();

        match normalized.as_str() {
            "script info" => Some(Self::ScriptInfo),
            "v4+ styles" | "v4 styles" | "v4++ styles" | "styles" => Some(Self::Styles),
            "events" => Some(Self::Events),
            _ => None,
        }
    }
}

/// Line consumer for one section
pub trait SectionHandler<'a> {
    /// Interpret one trimmed, non-empty, non-comment data line
    fn handle_line(&mut self, line: &'a str, line_number: usize, issues: &mut Vec<ParseIssue>);
}

/// Split `Label: payload`, returning the trimmed label and untrimmed payload
#[must_use]
pub fn split_label(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(label, payload)| (label.trim(), payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_names_normalize() {
        assert_eq!(SectionKind::from_header("Script Info"), Some(SectionKind::ScriptInfo));
        assert_eq!(SectionKind::from_header("SCRIPT  INFO"), Some(SectionKind::ScriptInfo));
        assert_eq!(SectionKind::from_header("V4 Styles"), Some(SectionKind::Styles));
        assert_eq!(SectionKind::from_header("events"), Some(SectionKind::Events));
        assert_eq!(SectionKind::from_header("Aegisub Project Garbage"), None);
        assert_eq!(SectionKind::from_header(""), None);
    }

    #[test]
    fn label_split() {
        assert_eq!(split_label("Dialogue : 0,1"), Some(("Dialogue", " 0,1")));
        assert_eq!(split_label("no label"), None);
    }
}
