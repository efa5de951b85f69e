//! # gilt-selectors
//!
//! Selector list and at-rule parameter normalization for CSS minification.
//!
//! Given the selector text of a rule, gilt-selectors produces the shortest
//! equivalent list: insignificant whitespace collapsed, redundant `*`
//! qualifiers dropped, attribute values unquoted where that is safe, and
//! duplicate entries removed, with the rest in natural order. The same list
//! treatment applies to `@media`-style parameters.
//!
//! ```
//! use gilt_selectors::{normalize_selector_list, Options};
//!
//! let out = normalize_selector_list(".item10, *.item2, .item2", &Options::default());
//! assert_eq!(out, ".item2,.item10");
//! ```
//!
//! ## Core Systems
//!
//! - **[`css`]**: Lexer, structural parser, normalizers, dedupe/sort, renderer
//! - **[`minifier`]**: Public entry points and the [`Minifier`] handle
//! - **[`config`]**: [`Options`] switches for sorting and deduplication

// Foundation
pub mod config;

// Core systems
pub mod css;

// Entry points
pub mod minifier;

pub use config::Options;
pub use css::stylesheet::{minify_stylesheet, StylesheetError};
pub use minifier::{normalize_parameter_list, normalize_selector_list, Minifier};
