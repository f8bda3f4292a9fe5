//! Dialogue text transforms
//!
//! Two views are derived from raw event text:
//!
//! - clean text: override blocks (`{...}`) removed and the `\N` / `\n`
//!   escapes turned into real newlines. Used for matching, search and
//!   navigation.
//! - display text: color overrides (`\c&H..&`, `\1c&H..&`) become paired
//!   `<span>` elements and line-break escapes become `<br>`. Consumed by
//!   renderers outside this crate.
//!
//! Override blocks are not nested; an unterminated `{` is kept as text.

use super::parse_bgr_color;

/// Remove override blocks and normalize line-break escapes
///
/// # Example
///
/// ```rust
/// # use subtrack_core::utils::strip_markup;
/// assert_eq!(strip_markup(r"{\b1}你好{\b0}\N世界"), "你好\n世界");
/// ```
#[must_use]
pub fn strip_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for segment in segments(raw) {
        if let Segment::Text(text) = segment {
            out.push_str(text);
        }
    }

    out.replace("\\N", "\n").replace("\\n", "\n").trim().to_string()
}

/// Convert color overrides and line breaks to markup
///
/// Unrecognized override tags are dropped. A color span stays open until
/// the next color override, a bare `\c` reset, or the end of the text.
///
/// # Example
///
/// ```rust
/// # use subtrack_core::utils::display_markup;
/// assert_eq!(
///     display_markup(r"{\c&H0000FF&}red{\c} plain\Nnext"),
///     r#"<span style="color:#FF0000">red</span> plain<br>next"#
/// );
/// ```
#[must_use]
pub fn display_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 16);
    let mut span_open = false;

    for segment in segments(raw) {
        match segment {
            Segment::Text(text) => {
                let escaped = escape_html(text);
                out.push_str(&escaped.replace("\\N", "<br>").replace("\\n", "<br>"));
            }
            Segment::Block(block) => {
                for tag in block.split('\\').skip(1) {
                    match color_override(tag) {
                        Some(ColorOverride::Set(color)) => {
                            if span_open {
                                out.push_str("</span>");
                            }
                            out.push_str("<span style=\"color:");
                            out.push_str(&color);
                            out.push_str("\">");
                            span_open = true;
                        }
                        Some(ColorOverride::Reset) if span_open => {
                            out.push_str("</span>");
                            span_open = false;
                        }
                        Some(ColorOverride::Reset) | None => {}
                    }
                }
            }
        }
    }

    if span_open {
        out.push_str("</span>");
    }
    out
}

/// Piece of raw dialogue text
enum Segment<'a> {
    /// Literal text between override blocks
    Text(&'a str),
    /// Contents of one `{...}` block, braces excluded
    Block(&'a str),
}

/// Split raw text into literal runs and override blocks
fn segments(raw: &str) -> Vec<Segment<'_>> {
    let mut result = Vec::new();
    let mut rest = raw;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        if open > 0 {
            result.push(Segment::Text(&rest[..open]));
        }
        result.push(Segment::Block(&rest[open + 1..open + close]));
        rest = &rest[open + close + 1..];
    }

    if !rest.is_empty() {
        result.push(Segment::Text(rest));
    }
    result
}

enum ColorOverride {
    Set(String),
    Reset,
}

/// Recognize `c`, `1c`, `c&H..&` and `1c&H..&` tags
fn color_override(tag: &str) -> Option<ColorOverride> {
    let tag = tag.trim();
    let value = tag.strip_prefix("1c").or_else(|| tag.strip_prefix('c'))?;

    if value.is_empty() {
        Some(ColorOverride::Reset)
    } else if value.starts_with('&') {
        parse_bgr_color(value)
            .ok()
            .map(|rgb| ColorOverride::Set(rgb.to_hex()))
    } else {
        None
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
