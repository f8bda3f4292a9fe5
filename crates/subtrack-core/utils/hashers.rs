//! Hash function utilities for lookup tables
//!
//! Provides ahash-based maps and the case-folded keys used by the style
//! table.

use ahash::RandomState;
use std::collections::HashMap;

/// Create a new `HashMap` with the ahash hasher
///
/// # Example
///
/// ```rust
/// use subtrack_core::utils::hashers::create_hash_map;
///
/// let mut map = create_hash_map::<String, usize>();
/// map.insert("Hanzi".to_string(), 0);
/// ```
#[must_use]
pub fn create_hash_map<K, V>() -> HashMap<K, V, RandomState> {
    HashMap::with_hasher(RandomState::new())
}

/// Lookup key that ignores ASCII case
///
#[must_use]
pub fn fold_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}
