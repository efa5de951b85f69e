//! Minifier entry points: selector lists, parameter lists, stylesheets.
//!
//! [`Minifier`] ties the options to the pipeline. The free functions are the
//! same operations for callers that keep their own [`Options`].

use tracing::trace;

use crate::config::Options;
use crate::css::normalize::{normalize_parameters, normalize_selectors};
use crate::css::parser::{parse_parameter_list, parse_selector_list};
use crate::css::render::join;
use crate::css::stylesheet::{minify_stylesheet, StylesheetError};

/// Normalize a rule's selector list.
///
/// `raw` is the text between the rule's previous delimiter and its `{`. The
/// result has no surrounding whitespace and no trailing comma. Never fails:
/// malformed input comes back in a best-effort normalized form.
pub fn normalize_selector_list(raw: &str, options: &Options) -> String {
    let selectors = normalize_selectors(parse_selector_list(raw), options);
    let out = join(&selectors);
    trace!(input = raw, output = %out, "normalized selector list");
    out
}

/// Normalize an at-rule's parameter list, e.g. the text after `@media`.
pub fn normalize_parameter_list(raw: &str, options: &Options) -> String {
    let parameters = normalize_parameters(parse_parameter_list(raw), options);
    let out = join(&parameters);
    trace!(input = raw, output = %out, "normalized parameter list");
    out
}

// ---------------------------------------------------------------------------
// Minifier
// ---------------------------------------------------------------------------

/// A configured minifier. Cheap to copy and holds no state between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Minifier {
    options: Options,
}

impl Minifier {
    /// Create a minifier with the given options.
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// The options this minifier runs with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// See [`normalize_selector_list`].
    pub fn selector_list(&self, raw: &str) -> String {
        normalize_selector_list(raw, &self.options)
    }

    /// See [`normalize_parameter_list`].
    pub fn parameter_list(&self, raw: &str) -> String {
        normalize_parameter_list(raw, &self.options)
    }

    /// See [`minify_stylesheet`].
    pub fn stylesheet(&self, css: &str) -> Result<String, StylesheetError> {
        minify_stylesheet(css, &self.options)
    }
}
