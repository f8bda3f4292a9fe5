//! Style AST node for track definitions
//!
//! Each `Style:` line declares one track. Besides the raw attributes the
//! definition carries two derived values used by renderers: the display
//! color in `#RRGGBB` form and a CSS font-size string.

use crate::{parser::format::FieldRecord, utils::decode_color};

/// Font size used when a style omits or garbles `Fontsize`
pub const DEFAULT_FONT_SIZE: f64 = 20.0;

/// Style definition from the `[V4+ Styles]` section
///
/// Immutable once created. The style table owns every definition and
/// looks them up by name.
///
/// # Examples
///
/// ```rust
/// use subtrack_core::parser::{ast::StyleDefinition, format::FieldFormat};
///
/// let format = FieldFormat::parse_declaration("Format: Name, Fontsize, PrimaryColour");
/// let record = format.decode_positional("Pinyin,36,&H0000FFFF");
/// let style = StyleDefinition::from_record(&record).unwrap();
///
/// assert_eq!(style.name, "Pinyin");
/// assert_eq!(style.display_color, "#FFFF00");
/// assert_eq!(style.font_size_css, "36px");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDefinition {
    /// Track name (unique within the table)
    pub name: String,

    /// Font family
    pub font_name: Option<String>,

    /// Raw font size value
    pub font_size: Option<String>,

    /// Primary color in `&HAABBGGRR` form
    pub primary_colour: Option<String>,

    /// Secondary (karaoke) color
    pub secondary_colour: Option<String>,

    /// Outline color
    pub outline_colour: Option<String>,

    /// Shadow/background color
    pub back_colour: Option<String>,

    /// Bold flag (-1/0 or weight)
    pub bold: Option<String>,

    /// Italic flag
    pub italic: Option<String>,

    /// Numpad alignment (1-9)
    pub alignment: Option<String>,

    /// Left margin in pixels
    pub margin_l: Option<String>,

    /// Right margin in pixels
    pub margin_r: Option<String>,

    /// Vertical margin in pixels
    pub margin_v: Option<String>,

    /// Primary color decoded to `#RRGGBB`, white on failure
    pub display_color: String,

    /// Font size as a CSS length, e.g. `"48px"`
    pub font_size_css: String,
}

impl StyleDefinition {
    /// Build a style from a decoded `Style:` record
    ///
    /// Returns `None` when the record has no usable name.
    #[must_use]
    pub fn from_record(record: &FieldRecord) -> Option<Self> {
        let name = record.get("Name").filter(|name| !name.is_empty())?;
        let owned = |keys: &[&str]| record.get_any(keys).map(str::to_string);

        let primary_colour = owned(&["PrimaryColour", "PrimaryColor"]);
        let font_size = owned(&["Fontsize", "FontSize", "Size"]);

        Some(Self {
            name: name.to_string(),
            font_name: owned(&["Fontname", "Font"]),
            display_color: decode_color(primary_colour.as_deref().unwrap_or_default()),
            font_size_css: font_size_css(font_size.as_deref()),
            font_size,
            primary_colour,
            secondary_colour: owned(&["SecondaryColour", "SecondaryColor"]),
            outline_colour: owned(&["OutlineColour", "OutlineColor", "TertiaryColour"]),
            back_colour: owned(&["BackColour", "BackColor"]),
            bold: owned(&["Bold"]),
            italic: owned(&["Italic"]),
            alignment: owned(&["Alignment"]),
            margin_l: owned(&["MarginL"]),
            margin_r: owned(&["MarginR"]),
            margin_v: owned(&["MarginV"]),
        })
    }

    /// Numeric font size, falling back to [`DEFAULT_FONT_SIZE`]
    #[must_use]
    pub fn font_size_value(&self) -> f64 {
        parse_font_size(self.font_size.as_deref()).unwrap_or(DEFAULT_FONT_SIZE)
    }
}

fn parse_font_size(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|size| size.is_finite() && *size > 0.0)
}

/// Render a font size as a CSS pixel length
fn font_size_css(raw: Option<&str>) -> String {
    let size = parse_font_size(raw).unwrap_or(DEFAULT_FONT_SIZE);
    if size.fract() == 0.0 {
        format!("{size:.0}px")
    } else {
        format!("{size}px")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::format::FieldFormat;

    fn style(declaration: &str, line: &str) -> Option<StyleDefinition> {
        let format = FieldFormat::parse_declaration(declaration);
        StyleDefinition::from_record(&format.decode_positional(line))
    }

    #[test]
    fn full_style_line() {
        let style = style(
            "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold",
            "Hanzi,Noto Sans SC,48,&H00FFFFFF,&H000000FF,&H00000000,&H80000000,-1",
        )
        .unwrap();

        assert_eq!(style.name, "Hanzi");
        assert_eq!(style.font_name.as_deref(), Some("Noto Sans SC"));
        assert_eq!(style.display_color, "#FFFFFF");
        assert_eq!(style.font_size_css, "48px");
        assert_eq!(style.bold.as_deref(), Some("-1"));
        assert_eq!(style.alignment, None);
    }

    #[test]
    fn missing_name_is_rejected() {
        assert!(style("Format: Name, Fontsize", ",20").is_none());
        assert!(style("Format: Fontsize", "20").is_none());
    }

    #[test]
    fn derived_values_fall_back() {
        let style = style("Format: Name, Fontsize, PrimaryColour", "English,big,nonsense").unwrap();
        assert_eq!(style.display_color, "#FFFFFF");
        assert_eq!(style.font_size_css, "20px");
        assert!((style.font_size_value() - DEFAULT_FONT_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn fractional_font_size_kept() {
        let style = style("Format: Name, Fontsize", "Pinyin,22.5").unwrap();
        assert_eq!(style.font_size_css, "22.5px");
    }

    #[test]
    fn american_spelling_alias() {
        let style = style("Format: NAME, primarycolor", "Main,&H00FF0000").unwrap();
        assert_eq!(style.display_color, "#0000FF");
    }
}
