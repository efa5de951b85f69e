//! Minifier configuration.
//!
//! [`Options`] is passed by reference through every call; nothing is cached
//! globally.

/// Switches for the list-level stages of normalization.
///
/// Whitespace, universal-selector and attribute normalization always run;
/// these options only control what happens to the list as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Sort entries in natural order.
    pub sort: bool,
    /// Drop entries that repeat an earlier entry.
    pub dedupe: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            sort: true,
            dedupe: true,
        }
    }
}

impl Options {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable sorting (builder).
    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Enable or disable deduplication (builder).
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }
}
