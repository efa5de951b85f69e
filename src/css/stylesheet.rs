//! Stylesheet walker: rewrite every rule prelude in a stylesheet.
//!
//! This is not a CSS parser. It scans the lexemes of the whole stylesheet for
//! `{`, `}` and `;` outside comments, strings and parentheses, and hands each
//! prelude (the text between the previous boundary and a `{`) to the
//! selector or parameter normalizer. Everything else is copied verbatim, so
//! declaration blocks come out untouched.

use tracing::{debug, trace};

use crate::config::Options;
use crate::css::tokenizer::{tokenize, Token};
use crate::minifier::{normalize_parameter_list, normalize_selector_list};

/// At-rules whose parameters are media-query-like lists.
const PARAMETER_AT_RULES: &[&str] = &["media", "supports"];

/// Errors from walking a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StylesheetError {
    #[error("unmatched '}}' at byte {offset}")]
    UnmatchedClose { offset: usize },
    #[error("block opened at byte {offset} is never closed")]
    UnclosedBlock { offset: usize },
}

/// Normalize the selector list of every rule and the parameters of every
/// `@media` and `@supports` rule in `css`.
pub fn minify_stylesheet(css: &str, options: &Options) -> Result<String, StylesheetError> {
    let mut out = String::with_capacity(css.len());
    let mut open_blocks: Vec<usize> = Vec::new();
    let mut prelude_start = 0;
    let mut paren_depth = 0usize;

    for lexeme in tokenize(css) {
        match lexeme.token {
            Token::ParenOpen => paren_depth += 1,
            Token::ParenClose => paren_depth = paren_depth.saturating_sub(1),
            Token::Text => {
                for (i, c) in lexeme.text.char_indices() {
                    let offset = lexeme.start + i;
                    match c {
                        '{' if paren_depth == 0 => {
                            out.push_str(&rewrite_prelude(&css[prelude_start..offset], options));
                            out.push('{');
                            open_blocks.push(offset);
                        }
                        // A `}` always ends the block, even after an unbalanced `(`.
                        '}' => {
                            if open_blocks.pop().is_none() {
                                return Err(StylesheetError::UnmatchedClose { offset });
                            }
                            paren_depth = 0;
                            out.push_str(&css[prelude_start..=offset]);
                        }
                        ';' if paren_depth == 0 => out.push_str(&css[prelude_start..=offset]),
                        _ => continue,
                    }
                    prelude_start = offset + 1;
                }
            }
            _ => {}
        }
    }

    if let Some(&offset) = open_blocks.first() {
        return Err(StylesheetError::UnclosedBlock { offset });
    }
    out.push_str(&css[prelude_start..]);
    Ok(out)
}

/// Rewrite one prelude, keeping the whitespace and comments that lead into
/// it.
fn rewrite_prelude(prelude: &str, options: &Options) -> String {
    let body_start = tokenize(prelude)
        .into_iter()
        .find(|l| !l.is(Token::Whitespace) && !l.is(Token::Comment))
        .map_or(prelude.len(), |l| l.start);
    let (leading, body) = prelude.split_at(body_start);
    if body.is_empty() {
        return prelude.to_string();
    }

    let Some(at_rule) = body.strip_prefix('@') else {
        let selectors = normalize_selector_list(body, options);
        trace!(before = body, after = %selectors, "rule");
        return format!("{leading}{selectors}");
    };

    let name_end = at_rule
        .find(|c: char| c.is_whitespace() || matches!(c, '(' | '"' | '\'' | '/'))
        .unwrap_or(at_rule.len());
    let (name, params) = at_rule.split_at(name_end);
    if !PARAMETER_AT_RULES.contains(&name.to_ascii_lowercase().as_str()) {
        return prelude.to_string();
    }

    let normalized = normalize_parameter_list(params, options);
    debug!(at_rule = name, before = params.trim(), after = %normalized, "at-rule");
    let separator = if !normalized.is_empty() && params.starts_with(char::is_whitespace) {
        " "
    } else {
        ""
    };
    format!("{leading}@{name}{separator}{normalized}")
}
