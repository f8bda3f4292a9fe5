//! Field decoding for `Format:` driven sections
//!
//! A section declares its column order once with a `Format:` line. Data
//! lines are then decoded against that order. Two strategies exist:
//!
//! - positional: split every comma, pair values with names, stop at the
//!   shorter list (style lines)
//! - bounded: split at most `N - 1` commas so the last field keeps any
//!   commas of its own (dialogue lines, whose last field is free text)
//!
//! Lookups by name ignore ASCII case and accept aliases.

/// Default `[V4+ Styles]` column order when no `Format:` line was seen
pub const DEFAULT_STYLE_FORMAT: &[&str] = &[
    "Name",
    "Fontname",
    "Fontsize",
    "PrimaryColour",
    "SecondaryColour",
    "OutlineColour",
    "BackColour",
    "Bold",
    "Italic",
    "Underline",
    "StrikeOut",
    "ScaleX",
    "ScaleY",
    "Spacing",
    "Angle",
    "BorderStyle",
    "Outline",
    "Shadow",
    "Alignment",
    "MarginL",
    "MarginR",
    "MarginV",
    "Encoding",
];

/// Default `[Events]` column order when no `Format:` line was seen
pub const DEFAULT_EVENT_FORMAT: &[&str] = &[
    "Layer", "Start", "End", "Style", "Name", "MarginL", "MarginR", "MarginV", "Effect", "Text",
];

/// Names accepted for the event start column
pub const START_KEYS: &[&str] = &["Start", "StartTime", "Begin"];
/// Names accepted for the event end column
pub const END_KEYS: &[&str] = &["End", "EndTime", "Stop"];
/// Names accepted for the event track column
pub const STYLE_KEYS: &[&str] = &["Style", "StyleName", "Track"];
/// Names accepted for the event text column
pub const TEXT_KEYS: &[&str] = &["Text", "Content", "Dialogue"];
/// Names accepted for the speaker column
pub const ACTOR_KEYS: &[&str] = &["Name", "Actor", "Speaker"];

/// Ordered column names declared by a `Format:` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFormat<'a> {
    fields: Vec<&'a str>,
}

impl<'a> FieldFormat<'a> {
    /// Decode a declaration line into field names
    ///
    /// Everything up to the first `:` is the label and is discarded.
    ///
    /// ```rust
    /// # use subtrack_core::parser::format::FieldFormat;
    /// let format = FieldFormat::parse_declaration("Format: Layer, Start , End,Text");
    /// assert_eq!(format.names(), &["Layer", "Start", "End", "Text"]);
    /// ```
    #[must_use]
    pub fn parse_declaration(line: &'a str) -> Self {
        let payload = line.split_once(':').map_or(line, |(_, rest)| rest);
        let fields = payload
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect();
        Self { fields }
    }

    /// Build a format from a fixed list of names
    #[must_use]
    pub fn from_names(names: &[&'a str]) -> Self {
        Self {
            fields: names.to_vec(),
        }
    }

    /// Declared field names in order
    #[must_use]
    pub fn names(&self) -> &[&'a str] {
        &self.fields
    }

    /// Number of declared fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the declaration named no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether any declared field matches one of `names`
    #[must_use]
    pub fn declares_any(&self, names: &[&str]) -> bool {
        self.fields
            .iter()
            .any(|field| names.iter().any(|name| field.eq_ignore_ascii_case(name)))
    }

    /// Decode a data payload by splitting every comma
    ///
    /// Excess values and missing trailing values are tolerated; the record
    /// holds as many pairs as the shorter of the two lists.
    #[must_use]
    pub fn decode_positional(&self, data: &'a str) -> FieldRecord<'a> {
        let fields = self
            .fields
            .iter()
            .zip(data.split(','))
            .map(|(name, value)| (*name, value.trim()))
            .collect();
        FieldRecord { fields }
    }

    /// Decode a data payload whose last field may contain commas
    ///
    /// Splits into at most `len()` parts. A short line keeps the tokens it
    /// has and leaves the remaining fields absent.
    ///
    /// ```rust
    /// # use subtrack_core::parser::format::FieldFormat;
    /// let format = FieldFormat::parse_declaration("Format: Start, End, Text");
    /// let record = format.decode_bounded("0:00:01.00,0:00:02.00,Well, hello, there");
    /// assert_eq!(record.get("text"), Some("Well, hello, there"));
    /// ```
    #[must_use]
    pub fn decode_bounded(&self, data: &'a str) -> FieldRecord<'a> {
        if self.fields.is_empty() {
            return FieldRecord::default();
        }
        let fields = self
            .fields
            .iter()
            .zip(data.splitn(self.fields.len(), ','))
            .map(|(name, value)| (*name, value.trim()))
            .collect();
        FieldRecord { fields }
    }
}

/// One decoded data line: declared names paired with their values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecord<'a> {
    fields: Vec<(&'a str, &'a str)>,
}

impl<'a> FieldRecord<'a> {
    /// Value of a field, matching the name without regard to ASCII case
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.fields
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }

    /// Value of the first present field among several aliases
    #[must_use]
    pub fn get_any(&self, names: &[&str]) -> Option<&'a str> {
        names.iter().find_map(|name| self.get(name))
    }

    /// Number of fields that received a value
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record holds no values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, value)` pairs in declared order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.fields.iter().copied()
    }
}
