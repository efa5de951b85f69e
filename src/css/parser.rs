//! Recursive descent parser for selector and parameter lists.
//!
//! Groups the lexemes from [`crate::css::tokenizer`] into the model in
//! [`crate::css::model`]. Parsing is total: malformed input degrades to text
//! components, and unterminated brackets or parens run to end of input.

use crate::css::model::*;
use crate::css::tokenizer::{tokenize, Lexeme, Token};

/// Pseudo-classes whose argument is itself a selector list.
const SELECTOR_LIST_PSEUDOS: &[&str] = &[":not", ":is", ":where", ":matches"];

/// Parse a comma-separated selector list.
pub fn parse_selector_list(input: &str) -> Vec<Selector> {
    let mut parser = Parser::new(input);
    parser.parse_selector_list(false)
}

/// Parse a comma-separated at-rule parameter list.
pub fn parse_parameter_list(input: &str) -> Vec<Parameter> {
    let mut parser = Parser::new(input);
    let mut parameters = Vec::new();
    loop {
        parameters.push(Parameter {
            parts: parser.parse_parameter_parts(false),
        });
        if !parser.eat(Token::Comma) {
            break;
        }
    }
    debug_assert!(parser.is_eof());
    parameters
}

/// Split a quoted-string lexeme into its quote character, its content and
/// whether the closing quote was present.
pub(crate) fn split_quoted(text: &str) -> (char, &str, bool) {
    let quote = text.chars().next().unwrap_or('"');
    let body = &text[quote.len_utf8().min(text.len())..];
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b as char == quote => return (quote, &body[..i], true),
            _ => i += 1,
        }
    }
    (quote, body, false)
}

fn takes_selector_list(component: &Component) -> bool {
    match component {
        Component::Text(text) => {
            let lower = text.to_ascii_lowercase();
            SELECTOR_LIST_PSEUDOS
                .iter()
                .any(|pseudo| lower.ends_with(pseudo))
        }
        _ => false,
    }
}

/// Recursive descent parser state.
struct Parser<'a> {
    tokens: Vec<Lexeme<'a>>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            tokens: tokenize(input),
            cursor: 0,
        }
    }

    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<Lexeme<'a>> {
        self.tokens.get(self.cursor).copied()
    }

    fn advance(&mut self) -> Option<Lexeme<'a>> {
        let lexeme = self.peek()?;
        self.cursor += 1;
        Some(lexeme)
    }

    /// Consume the next lexeme if it is `token`.
    fn eat(&mut self, token: Token) -> bool {
        if self.peek().is_some_and(|l| l.is(token)) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Parse a comma-separated list of selectors. When `nested`, the list
    /// ends at an unconsumed `)`.
    fn parse_selector_list(&mut self, nested: bool) -> Vec<Selector> {
        let mut selectors = vec![self.parse_selector(nested)];
        while self.eat(Token::Comma) {
            selectors.push(self.parse_selector(nested));
        }
        selectors
    }

    /// Parse a single selector: compound selectors joined by combinators.
    ///
    /// Whitespace between two compounds is a descendant combinator;
    /// whitespace next to an explicit combinator or at either end of the
    /// selector is dropped.
    fn parse_selector(&mut self, nested: bool) -> Selector {
        let mut selector = Selector::new();
        let mut compound = CompoundSelector::new();
        let mut spaced = false;

        while let Some(lexeme) = self.peek() {
            match lexeme.token {
                Token::Comma => break,
                Token::ParenClose if nested => break,
                Token::Whitespace => {
                    self.advance();
                    flush(&mut selector, &mut compound);
                    spaced = true;
                }
                Token::Combinator => {
                    self.advance();
                    flush(&mut selector, &mut compound);
                    let combinator = lexeme.text.chars().next().and_then(Combinator::from_char);
                    if let Some(combinator) = combinator {
                        selector.parts.push(SelectorPart::Combinator(combinator));
                    }
                    spaced = false;
                }
                _ => {
                    if compound.is_empty()
                        && spaced
                        && matches!(selector.parts.last(), Some(SelectorPart::Compound(_)))
                    {
                        selector
                            .parts
                            .push(SelectorPart::Combinator(Combinator::Descendant));
                    }
                    spaced = false;
                    self.advance();
                    let component = self.parse_component(lexeme, &compound);
                    compound.push(component);
                }
            }
        }

        flush(&mut selector, &mut compound);
        selector
    }

    /// Turn an already consumed lexeme into the next component of
    /// `compound`, parsing its bracketed or parenthesized body if it opens one.
    fn parse_component(&mut self, lexeme: Lexeme<'a>, compound: &CompoundSelector) -> Component {
        match lexeme.token {
            Token::Text if lexeme.text == "*" => Component::Universal,
            Token::Escape => Component::Escape(lexeme.text.to_string()),
            Token::Comment => Component::Comment(lexeme.text.to_string()),
            Token::BracketOpen => Component::Attribute(self.parse_attribute()),
            Token::ParenOpen => {
                let selectors = compound.components.last().is_some_and(takes_selector_list);
                Component::Group(self.parse_group(selectors))
            }
            _ => Component::Text(lexeme.text.to_string()),
        }
    }

    /// Parse the inside of `( ... )`; the `(` is already consumed.
    fn parse_group(&mut self, selectors: bool) -> Group {
        let arguments = if selectors {
            Arguments::Selectors(self.parse_selector_list(true))
        } else {
            Arguments::Raw(self.parse_raw_arguments())
        };
        let closed = self.eat(Token::ParenClose);
        Group { arguments, closed }
    }

    /// Collect raw argument pieces up to the matching `)`, which is left
    /// unconsumed. Whitespace runs become `None`.
    fn parse_raw_arguments(&mut self) -> Vec<Option<String>> {
        let mut pieces = Vec::new();
        let mut depth = 0usize;

        while let Some(lexeme) = self.peek() {
            match lexeme.token {
                Token::ParenClose if depth == 0 => break,
                Token::ParenClose => depth -= 1,
                Token::ParenOpen => depth += 1,
                _ => {}
            }
            self.advance();
            if lexeme.is(Token::Whitespace) {
                pieces.push(None);
            } else {
                pieces.push(Some(lexeme.text.to_string()));
            }
        }

        pieces
    }

    /// Parse the inside of `[ ... ]`; the `[` is already consumed.
    ///
    /// Whitespace around the name, operator and value is dropped here; the
    /// normalizer decides about quotes.
    fn parse_attribute(&mut self) -> AttributeSelector {
        let mut attribute = AttributeSelector::new(String::new());
        let mut modifier = String::new();
        let mut after_value = false;
        let mut modifier_spaced = false;
        attribute.closed = false;

        while let Some(lexeme) = self.advance() {
            match lexeme.token {
                Token::BracketClose => {
                    attribute.closed = true;
                    break;
                }
                Token::Whitespace => {
                    if after_value {
                        modifier_spaced = !modifier.is_empty();
                    } else if attribute.value.is_some() {
                        after_value = true;
                    }
                    continue;
                }
                _ => {}
            }

            if attribute.operator.is_none() {
                match lexeme.text.find('=') {
                    Some(eq) if lexeme.is(Token::Text) => {
                        attribute.name.push_str(&lexeme.text[..eq]);
                        let mut operator = String::from("=");
                        if attribute.name.ends_with(['~', '|', '^', '$', '*']) {
                            if let Some(prefix) = attribute.name.pop() {
                                operator.insert(0, prefix);
                            }
                        }
                        attribute.operator = Some(operator);
                        let rest = &lexeme.text[eq + 1..];
                        if !rest.is_empty() {
                            attribute.value = Some(AttributeValue::Ident(rest.to_string()));
                        }
                    }
                    _ => attribute.name.push_str(lexeme.text),
                }
            } else if !after_value {
                attribute.value = Some(match attribute.value.take() {
                    None if lexeme.is(Token::QuotedString) => {
                        let (quote, content, closed) = split_quoted(lexeme.text);
                        AttributeValue::Quoted {
                            quote,
                            content: content.to_string(),
                            closed,
                        }
                    }
                    None => AttributeValue::Ident(lexeme.text.to_string()),
                    Some(AttributeValue::Ident(mut raw)) => {
                        raw.push_str(lexeme.text);
                        AttributeValue::Ident(raw)
                    }
                    // Text glued to a quoted value: keep all of it raw.
                    Some(quoted @ AttributeValue::Quoted { .. }) => {
                        let mut raw = crate::css::render::attribute_value(&quoted);
                        raw.push_str(lexeme.text);
                        AttributeValue::Ident(raw)
                    }
                });
            } else {
                if modifier_spaced {
                    modifier.push(' ');
                    modifier_spaced = false;
                }
                modifier.push_str(lexeme.text);
            }
        }

        if !modifier.is_empty() {
            attribute.modifier = Some(modifier);
        }
        attribute
    }

    /// Parse parameter pieces until a top-level `,` or, when `nested`, an
    /// unconsumed `)`.
    fn parse_parameter_parts(&mut self, nested: bool) -> Vec<ParameterPart> {
        let mut parts = Vec::new();

        while let Some(lexeme) = self.peek() {
            let part = match lexeme.token {
                Token::Comma if !nested => break,
                Token::ParenClose if nested => break,
                Token::Whitespace => ParameterPart::Space,
                Token::Comment => ParameterPart::Comment(lexeme.text.to_string()),
                Token::QuotedString => ParameterPart::Quoted(lexeme.text.to_string()),
                Token::ParenOpen => {
                    self.advance();
                    let inner = self.parse_parameter_parts(true);
                    let closed = self.eat(Token::ParenClose);
                    parts.push(ParameterPart::Feature {
                        parts: inner,
                        closed,
                    });
                    continue;
                }
                _ => ParameterPart::Word(lexeme.text.to_string()),
            };
            self.advance();
            parts.push(part);
        }

        parts
    }
}

/// Move a finished compound selector into the selector.
fn flush(selector: &mut Selector, compound: &mut CompoundSelector) {
    if !compound.is_empty() {
        selector
            .parts
            .push(SelectorPart::Compound(std::mem::take(compound)));
    }
}
