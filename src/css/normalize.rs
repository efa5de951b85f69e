//! Selector and parameter normalization.
//!
//! Works on the parsed model: the parser has already dropped whitespace that
//! the selector grammar makes insignificant, so what is left here is
//! universal-selector elision, attribute cleanup, raw argument spacing and
//! the list-level dedupe/sort, applied recursively to selector-list pseudo
//! arguments such as `:not(...)`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Options;
use crate::css::model::*;
use crate::css::ordering::canonicalize;

static ESCAPES_HEX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[0-9A-Fa-f]{1,6}[ \t\n\f\r]?").unwrap());
static ESCAPE_ANY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\.").unwrap());
static QUOTE_OR_SPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"["'\s]"#).unwrap());
static DISALLOWED_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u0000-\u002c\u002e\u002f\u003A-\u0040\u005B-\u005E\u0060\u007B-\u009f]")
        .unwrap()
});
static LEADING_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:-?\d|--)").unwrap());

/// Normalize every selector of a list, then dedupe and sort the list.
///
/// Entries with nothing but comments or whitespace are dropped.
pub fn normalize_selectors(list: Vec<Selector>, options: &Options) -> Vec<Selector> {
    let list: Vec<Selector> = list
        .into_iter()
        .filter(Selector::has_content)
        .map(|selector| normalize_selector(selector, options))
        .collect();
    canonicalize(list, Selector::key, options)
}

/// Normalize every parameter of a list, then dedupe and sort the list.
pub fn normalize_parameters(list: Vec<Parameter>, options: &Options) -> Vec<Parameter> {
    let list: Vec<Parameter> = list
        .into_iter()
        .filter(Parameter::has_content)
        .map(normalize_parameter)
        .collect();
    canonicalize(list, ToString::to_string, options)
}

fn normalize_selector(mut selector: Selector, options: &Options) -> Selector {
    for part in &mut selector.parts {
        if let SelectorPart::Compound(compound) = part {
            normalize_compound(compound, options);
        }
    }
    selector
}

fn normalize_compound(compound: &mut CompoundSelector, options: &Options) {
    // `*.a` matches exactly what `.a` does. A comment right after the `*`
    // pins it in place.
    if matches!(
        compound.components.as_slice(),
        [Component::Universal, next, ..] if next.is_qualifier()
    ) {
        compound.components.remove(0);
    }

    for component in &mut compound.components {
        match component {
            Component::Attribute(attribute) => normalize_attribute(attribute),
            Component::Group(group) => normalize_group(group, options),
            _ => {}
        }
    }
}

fn normalize_group(group: &mut Group, options: &Options) {
    match &mut group.arguments {
        Arguments::Selectors(list) => {
            *list = normalize_selectors(std::mem::take(list), options);
        }
        Arguments::Raw(pieces) => collapse_raw_whitespace(pieces),
    }
}

/// Trim whitespace pieces from both ends and merge adjacent ones.
fn collapse_raw_whitespace(pieces: &mut Vec<Option<String>>) {
    let mut previous_space = true;
    pieces.retain(|piece| {
        let keep = piece.is_some() || !previous_space;
        previous_space = piece.is_none();
        keep
    });
    if pieces.last().is_some_and(Option::is_none) {
        pieces.pop();
    }
}

fn normalize_attribute(attribute: &mut AttributeSelector) {
    let Some(AttributeValue::Quoted {
        content, closed, ..
    }) = &mut attribute.value
    else {
        return;
    };

    *content = remove_line_continuations(content);
    if *closed && can_unquote(content) {
        let ident = std::mem::take(content);
        attribute.value = Some(AttributeValue::Ident(ident));
    }
}

/// Remove backslash-newline continuations (`\` followed by LF, CR, CRLF or
/// FF). Other escapes are left alone.
pub(crate) fn remove_line_continuations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('\n') | Some('\x0c') => {
                chars.next();
            }
            Some('\r') => {
                chars.next();
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            Some(&escaped) => {
                chars.next();
                out.push('\\');
                out.push(escaped);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Returns `true` if a quoted attribute value can be written as a bare
/// identifier without changing what it matches.
///
/// Quotes and whitespace rule a value out even when escaped; hex escapes
/// (with their terminating space) and other escapes otherwise count as
/// identifier characters.
pub(crate) fn can_unquote(value: &str) -> bool {
    if value.is_empty() || value == "-" {
        return false;
    }

    let value = ESCAPES_HEX_REGEX.replace_all(value, "a");
    if QUOTE_OR_SPACE_REGEX.is_match(&value) {
        return false;
    }
    let value = ESCAPE_ANY_REGEX.replace_all(&value, "a");
    !(DISALLOWED_RANGE_REGEX.is_match(&value) || LEADING_NUMBER_REGEX.is_match(&value))
}

fn normalize_parameter(parameter: Parameter) -> Parameter {
    Parameter {
        parts: normalize_parameter_parts(parameter.parts, false),
    }
}

/// Collapse whitespace in parameter parts. At the top level every run becomes
/// one space; inside a feature expression runs next to `:` or `;` vanish too.
/// Runs at either end are always dropped.
fn normalize_parameter_parts(parts: Vec<ParameterPart>, nested: bool) -> Vec<ParameterPart> {
    let mut out: Vec<ParameterPart> = Vec::with_capacity(parts.len());
    let mut spaced = false;

    for part in parts {
        let part = match part {
            ParameterPart::Space => {
                spaced = true;
                continue;
            }
            ParameterPart::Feature { parts, closed } => ParameterPart::Feature {
                parts: normalize_parameter_parts(parts, true),
                closed,
            },
            ParameterPart::Quoted(raw) => ParameterPart::Quoted(remove_line_continuations(&raw)),
            other => other,
        };

        if spaced && !out.is_empty() {
            let glued = nested
                && (out.last().is_some_and(ends_with_separator) || starts_with_separator(&part));
            if !glued {
                out.push(ParameterPart::Space);
            }
        }
        spaced = false;
        out.push(part);
    }

    out
}

fn ends_with_separator(part: &ParameterPart) -> bool {
    matches!(part, ParameterPart::Word(word) if word.ends_with([':', ';']))
}

fn starts_with_separator(part: &ParameterPart) -> bool {
    matches!(part, ParameterPart::Word(word) if word.starts_with([':', ';']))
}
