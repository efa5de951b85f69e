//! Serialization of the selector and parameter model.
//!
//! [`fmt::Display`] gives the compact output form (`h1>p`). The comparison
//! key from [`Selector::key`] is the same text with explicit combinators
//! spaced out (`h1 > p`), so a descendant space and an explicit combinator
//! sort against each other by the combinator character.

use std::fmt::{self, Write};

use crate::css::model::*;

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_selector(f, self, false)
    }
}

impl Selector {
    /// Canonical comparison key used for deduplication and ordering.
    pub fn key(&self) -> String {
        let mut key = String::new();
        // Writing into a `String` cannot fail.
        let _ = write_selector(&mut key, self, true);
        key
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        f.write_str(&self.name)?;
        if let Some(operator) = &self.operator {
            f.write_str(operator)?;
        }
        if let Some(value) = &self.value {
            f.write_str(&attribute_value(value))?;
        }
        if let Some(modifier) = &self.modifier {
            write!(f, " {modifier}")?;
        }
        if self.closed {
            f.write_char(']')?;
        }
        Ok(())
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_parameter_parts(f, &self.parts)
    }
}

/// Serialize an attribute value, re-adding quotes when it has them.
pub(crate) fn attribute_value(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Ident(raw) => raw.clone(),
        AttributeValue::Quoted {
            quote,
            content,
            closed,
        } => {
            let mut out = String::with_capacity(content.len() + 2);
            out.push(*quote);
            out.push_str(content);
            if *closed {
                out.push(*quote);
            }
            out
        }
    }
}

/// Join rendered entries with a single comma.
pub fn join<T: fmt::Display>(entries: &[T]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{entry}");
    }
    out
}

fn write_selector<W: Write>(out: &mut W, selector: &Selector, keyed: bool) -> fmt::Result {
    for part in &selector.parts {
        match part {
            SelectorPart::Compound(compound) => write_compound(out, compound, keyed)?,
            SelectorPart::Combinator(Combinator::Descendant) => out.write_char(' ')?,
            SelectorPart::Combinator(combinator) if keyed => {
                write!(out, " {} ", combinator.as_str())?
            }
            SelectorPart::Combinator(combinator) => out.write_str(combinator.as_str())?,
        }
    }
    Ok(())
}

fn write_compound<W: Write>(out: &mut W, compound: &CompoundSelector, keyed: bool) -> fmt::Result {
    for component in &compound.components {
        match component {
            Component::Universal => out.write_char('*')?,
            Component::Text(raw) | Component::Escape(raw) | Component::Comment(raw) => {
                out.write_str(raw)?
            }
            Component::Attribute(attribute) => write!(out, "{attribute}")?,
            Component::Group(group) => write_group(out, group, keyed)?,
        }
    }
    Ok(())
}

fn write_group<W: Write>(out: &mut W, group: &Group, keyed: bool) -> fmt::Result {
    out.write_char('(')?;
    match &group.arguments {
        Arguments::Selectors(list) => {
            for (i, selector) in list.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_selector(out, selector, keyed)?;
            }
        }
        Arguments::Raw(pieces) => {
            for piece in pieces {
                out.write_str(piece.as_deref().unwrap_or(" "))?;
            }
        }
    }
    if group.closed {
        out.write_char(')')?;
    }
    Ok(())
}

fn write_parameter_parts<W: Write>(out: &mut W, parts: &[ParameterPart]) -> fmt::Result {
    for part in parts {
        match part {
            ParameterPart::Word(raw) | ParameterPart::Comment(raw) | ParameterPart::Quoted(raw) => {
                out.write_str(raw)?
            }
            ParameterPart::Space => out.write_char(' ')?,
            ParameterPart::Feature { parts, closed } => {
                out.write_char('(')?;
                write_parameter_parts(out, parts)?;
                if *closed {
                    out.write_char(')')?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::{parse_parameter_list, parse_selector_list};
    use pretty_assertions::assert_eq;

    fn rendered(input: &str) -> Vec<String> {
        parse_selector_list(input)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_compact_combinators() {
        assert_eq!(rendered("h1 + p, h1 > p, h1 ~ p"), vec!["h1+p", "h1>p", "h1~p"]);
    }

    #[test]
    fn test_descendant_space_is_single() {
        assert_eq!(rendered("h1    p"), vec!["h1 p"]);
    }

    #[test]
    fn test_key_spaces_explicit_combinators() {
        let keys: Vec<String> = parse_selector_list("* + *, * > *, * h1, a>b")
            .iter()
            .map(Selector::key)
            .collect();
        assert_eq!(keys, vec!["* + *", "* > *", "* h1", "a > b"]);
    }

    #[test]
    fn test_key_recurses_into_groups() {
        let list = parse_selector_list("a:not(b>c)");
        assert_eq!(list[0].key(), "a:not(b > c)");
        assert_eq!(list[0].to_string(), "a:not(b>c)");
    }

    #[test]
    fn test_comments_and_escapes_are_verbatim() {
        assert_eq!(
            rendered(r"/*a*/*/*b*/, .\31 0\+"),
            vec!["/*a*/*/*b*/", r".\31 0\+"]
        );
    }

    #[test]
    fn test_unterminated_regions_get_no_terminator() {
        assert_eq!(rendered("a:not(b"), vec!["a:not(b"]);
        assert_eq!(rendered("a[href"), vec!["a[href"]);
    }

    #[test]
    fn test_attribute_display() {
        let mut attribute = AttributeSelector::new("lang");
        attribute.operator = Some("|=".into());
        attribute.value = Some(AttributeValue::Quoted {
            quote: '\'',
            content: "en".into(),
            closed: true,
        });
        attribute.modifier = Some("i".into());
        assert_eq!(attribute.to_string(), "[lang|='en' i]");
    }

    #[test]
    fn test_parameter_display() {
        let list = parse_parameter_list("screen and (color)");
        assert_eq!(list[0].to_string(), "screen and (color)");
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&["a", "b", "c"]), "a,b,c");
        assert_eq!(join::<&str>(&[]), "");
    }
}
