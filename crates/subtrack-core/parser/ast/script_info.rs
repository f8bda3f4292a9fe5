//! Script header metadata
//!
//! Free-form `Key: Value` pairs from `[Script Info]`. Informational only;
//! nothing in the timeline depends on them.

/// Key/value pairs from the `[Script Info]` section, in script order
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptMetadata {
    fields: Vec<(String, String)>,
}

impl ScriptMetadata {
    /// Empty metadata
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Record a header field; a repeated key replaces the earlier value
    pub fn insert(&mut self, key: &str, value: &str) {
        if let Some(entry) = self
            .fields
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(key))
        {
            entry.1 = value.to_string();
        } else {
            self.fields.push((key.to_string(), value.to_string()));
        }
    }

    /// Value for a key, ignoring ASCII case
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    /// The `Title` header
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.get("Title")
    }

    /// The `ScriptType` header (e.g. `v4.00+`)
    #[must_use]
    pub fn script_type(&self) -> Option<&str> {
        self.get("ScriptType")
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no key was stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Key/value pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
