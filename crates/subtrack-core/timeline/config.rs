//! Navigation tuning parameters
//!
//! All tolerances are in seconds.

use crate::utils::CoreError;

/// Starts closer than this collapse into one event (seconds)
pub const DEFAULT_DEDUP_EPSILON: f64 = 0.001;
/// Same-text fragments separated by at most this gap merge (seconds)
pub const DEFAULT_MERGE_GAP_TOLERANCE: f64 = 0.18;
/// Next/previous jumps ignore starts within this distance (seconds)
pub const DEFAULT_NAVIGATION_BUFFER: f64 = 0.05;
/// Track names tried, in order, when no track is pinned
pub const DEFAULT_MAIN_TRACK_CANDIDATES: &[&str] = &["Hanzi", "Chinese", "Main", "Default"];

/// Configuration for navigable event computation
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationConfig {
    /// Start-time dedup window in seconds
    pub dedup_epsilon: f64,
    /// Largest gap bridged when merging identical text, in seconds
    pub merge_gap_tolerance: f64,
    /// Boundary buffer for next/previous queries, in seconds
    pub navigation_buffer: f64,
    /// Conventional main-track names, matched ignoring ASCII case
    pub main_track_candidates: Vec<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            dedup_epsilon: DEFAULT_DEDUP_EPSILON,
            merge_gap_tolerance: DEFAULT_MERGE_GAP_TOLERANCE,
            navigation_buffer: DEFAULT_NAVIGATION_BUFFER,
            main_track_candidates: DEFAULT_MAIN_TRACK_CANDIDATES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl NavigationConfig {
    /// Set the start-time dedup window.
    #[must_use]
    pub fn with_dedup_epsilon(mut self, seconds: f64) -> Self {
        self.dedup_epsilon = seconds;
        self
    }

    /// Set the merge gap tolerance.
    #[must_use]
    pub fn with_merge_gap_tolerance(mut self, seconds: f64) -> Self {
        self.merge_gap_tolerance = seconds;
        self
    }

    /// Set the next/previous boundary buffer.
    #[must_use]
    pub fn with_navigation_buffer(mut self, seconds: f64) -> Self {
        self.navigation_buffer = seconds;
        self
    }

    /// Replace the main-track candidate list.
    #[must_use]
    pub fn with_main_track_candidates<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.main_track_candidates = names.into_iter().map(Into::into).collect();
        self
    }

    /// Check that every tolerance is a finite, non-negative number
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] naming the first offending parameter.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, value) in [
            ("dedup_epsilon", self.dedup_epsilon),
            ("merge_gap_tolerance", self.merge_gap_tolerance),
            ("navigation_buffer", self.navigation_buffer),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
