//! logos-based selector and parameter tokenizer.
//!
//! Unlike a full CSS tokenizer this one keeps every byte: whitespace is a
//! token, and the spans of all lexemes concatenate back to the input. Opaque
//! regions (comments, quoted strings, escapes) are scanned by callbacks so a
//! delimiter inside them is never seen by the parser.
//!
//! Token priority follows the usual logos rules:
//! 1. Longest match wins (`/*` as [`Token::Comment`] beats `/` as Text)
//! 2. For equal length matches, earlier-defined variants win

use logos::{Lexer, Logos};

/// Selector/parameter token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // ── Opaque regions ───────────────────────────────────────────────

    /// Block comment, `/* ... */`. Runs to end of input when unterminated.
    #[token("/*", comment)]
    Comment,

    /// Single or double quoted string, quotes included.
    #[token("\"", quoted)]
    #[token("'", quoted)]
    QuotedString,

    /// CSS escape: `\` + up to six hex digits + one optional whitespace, or
    /// `\` + any single character.
    #[token("\\", escape)]
    Escape,

    // ── Structure ────────────────────────────────────────────────────

    /// Run of CSS whitespace.
    #[regex(r"[ \t\n\r\f]+")]
    Whitespace,

    /// `[`
    #[token("[")]
    BracketOpen,

    /// `]`
    #[token("]")]
    BracketClose,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// `,`
    #[token(",")]
    Comma,

    /// `>`, `+` or `~`.
    #[token(">")]
    #[token("+")]
    #[token("~")]
    Combinator,

    /// Anything else. `*` and `/` always stand alone so the universal
    /// selector is its own unit and comment openers are found. `>>>` is
    /// the legacy shadow-piercing combinator; it stays opaque like `/deep/`.
    #[regex(r#"[^ \t\n\r\f\[\](),>+~/\\"'*]+"#)]
    #[token("*")]
    #[token("/")]
    #[token(">>>")]
    Text,
}

fn comment(lex: &mut Lexer<'_, Token>) -> bool {
    let rest = lex.remainder();
    let len = rest.find("*/").map_or(rest.len(), |end| end + 2);
    lex.bump(len);
    true
}

fn quoted(lex: &mut Lexer<'_, Token>) -> bool {
    let quote = lex.slice().as_bytes()[0];
    let rest = lex.remainder().as_bytes();
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            b'\\' => i += 2,
            b if b == quote => {
                lex.bump(i + 1);
                return true;
            }
            _ => i += 1,
        }
    }
    lex.bump(rest.len());
    true
}

fn escape(lex: &mut Lexer<'_, Token>) -> bool {
    let rest = lex.remainder();
    let hex = rest
        .bytes()
        .take(6)
        .take_while(u8::is_ascii_hexdigit)
        .count();
    let len = if hex > 0 {
        let tail = &rest[hex..];
        if tail.starts_with("\r\n") {
            hex + 2
        } else if tail.starts_with([' ', '\t', '\n', '\r', '\x0c']) {
            hex + 1
        } else {
            hex
        }
    } else {
        rest.chars().next().map_or(0, char::len_utf8)
    };
    lex.bump(len);
    true
}

/// A token together with the slice of input it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub token: Token,
    pub text: &'a str,
    /// Byte offset of `text` in the input.
    pub start: usize,
}

impl Lexeme<'_> {
    /// Returns `true` if this lexeme is the given token kind.
    pub fn is(&self, token: Token) -> bool {
        self.token == token
    }
}

/// Tokenize a selector or parameter list.
///
/// Never fails: bytes logos cannot classify come back as [`Token::Text`], so
/// the lexeme texts always concatenate to `input`.
pub fn tokenize(input: &str) -> Vec<Lexeme<'_>> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| Lexeme {
            token: result.unwrap_or(Token::Text),
            text: &input[span.clone()],
            start: span.start,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: tokenize and return just the token variants.
    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).into_iter().map(|l| l.token).collect()
    }

    /// Helper: tokenize and return (token, slice) pairs.
    fn tokens_with_text(input: &str) -> Vec<(Token, &str)> {
        tokenize(input).into_iter().map(|l| (l.token, l.text)).collect()
    }

    fn reconstruct(input: &str) -> String {
        tokenize(input).into_iter().map(|l| l.text).collect()
    }

    // ── Punctuation ──────────────────────────────────────────────────

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tokens("[]() , > + ~"),
            vec![
                Token::BracketOpen,
                Token::BracketClose,
                Token::ParenOpen,
                Token::ParenClose,
                Token::Whitespace,
                Token::Comma,
                Token::Whitespace,
                Token::Combinator,
                Token::Whitespace,
                Token::Combinator,
                Token::Whitespace,
                Token::Combinator,
            ]
        );
    }

    #[test]
    fn test_text_runs() {
        assert_eq!(
            tokens_with_text("h1.title:hover"),
            vec![(Token::Text, "h1.title:hover")]
        );
    }

    #[test]
    fn test_star_stands_alone() {
        assert_eq!(
            tokens_with_text("*.test"),
            vec![(Token::Text, "*"), (Token::Text, ".test")]
        );
    }

    #[test]
    fn test_whitespace_is_kept() {
        assert_eq!(
            tokens_with_text("h1 \t\n p"),
            vec![
                (Token::Text, "h1"),
                (Token::Whitespace, " \t\n "),
                (Token::Text, "p"),
            ]
        );
    }

    // ── Comments ─────────────────────────────────────────────────────

    #[test]
    fn test_comment_is_opaque() {
        assert_eq!(
            tokens_with_text("a/* b, c > [d */e"),
            vec![
                (Token::Text, "a"),
                (Token::Comment, "/* b, c > [d */"),
                (Token::Text, "e"),
            ]
        );
    }

    #[test]
    fn test_comment_between_universal() {
        assert_eq!(
            tokens_with_text("/*comment*/*/*comment*/"),
            vec![
                (Token::Comment, "/*comment*/"),
                (Token::Text, "*"),
                (Token::Comment, "/*comment*/"),
            ]
        );
    }

    #[test]
    fn test_unterminated_comment_runs_to_end() {
        assert_eq!(
            tokens_with_text("a /* b, c"),
            vec![
                (Token::Text, "a"),
                (Token::Whitespace, " "),
                (Token::Comment, "/* b, c"),
            ]
        );
    }

    #[test]
    fn test_lone_slash_is_text() {
        assert_eq!(
            tokens_with_text("body /deep/ .x"),
            vec![
                (Token::Text, "body"),
                (Token::Whitespace, " "),
                (Token::Text, "/"),
                (Token::Text, "deep"),
                (Token::Text, "/"),
                (Token::Whitespace, " "),
                (Token::Text, ".x"),
            ]
        );
    }

    #[test]
    fn test_shadow_piercing_combinator_is_text() {
        assert_eq!(
            tokens_with_text("a >>> b>c"),
            vec![
                (Token::Text, "a"),
                (Token::Whitespace, " "),
                (Token::Text, ">>>"),
                (Token::Whitespace, " "),
                (Token::Text, "b"),
                (Token::Combinator, ">"),
                (Token::Text, "c"),
            ]
        );
    }

    // ── Strings ──────────────────────────────────────────────────────

    #[test]
    fn test_quoted_strings() {
        assert_eq!(
            tokens_with_text(r#""a, b" 'c]'"#),
            vec![
                (Token::QuotedString, "\"a, b\""),
                (Token::Whitespace, " "),
                (Token::QuotedString, "'c]'"),
            ]
        );
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        assert_eq!(
            tokens_with_text(r#""a\"b"c"#),
            vec![(Token::QuotedString, r#""a\"b""#), (Token::Text, "c")]
        );
    }

    #[test]
    fn test_line_continuation_inside_string() {
        assert_eq!(
            tokens_with_text("\"woop \\\nwoop\"]"),
            vec![
                (Token::QuotedString, "\"woop \\\nwoop\""),
                (Token::BracketClose, "]"),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        assert_eq!(tokens("\"abc, def"), vec![Token::QuotedString]);
    }

    // ── Escapes ──────────────────────────────────────────────────────

    #[test]
    fn test_hex_escape_swallows_one_space() {
        assert_eq!(
            tokens_with_text(r".\31 0\+"),
            vec![
                (Token::Text, "."),
                (Token::Escape, r"\31 "),
                (Token::Text, "0"),
                (Token::Escape, r"\+"),
            ]
        );
    }

    #[test]
    fn test_escaped_delimiters_are_not_structure() {
        assert_eq!(
            tokens(r"\,\>\(\["),
            vec![Token::Escape, Token::Escape, Token::Escape, Token::Escape]
        );
    }

    #[test]
    fn test_hex_escape_is_at_most_six_digits() {
        assert_eq!(
            tokens_with_text(r"\0000411"),
            vec![(Token::Escape, r"\000041"), (Token::Text, "1")]
        );
    }

    #[test]
    fn test_hex_escape_crlf_counts_once() {
        assert_eq!(
            tokens_with_text("\\26\r\n b"),
            vec![
                (Token::Escape, "\\26\r\n"),
                (Token::Whitespace, " "),
                (Token::Text, "b"),
            ]
        );
    }

    #[test]
    fn test_trailing_backslash() {
        assert_eq!(tokens_with_text("a\\"), vec![(Token::Text, "a"), (Token::Escape, "\\")]);
    }

    #[test]
    fn test_escaped_multibyte_char() {
        assert_eq!(tokens_with_text("\\é"), vec![(Token::Escape, "\\é")]);
    }

    // ── Lossless ─────────────────────────────────────────────────────

    #[test]
    fn test_lexemes_reconstruct_input() {
        let inputs = [
            "",
            "h1,  h2,  h3",
            "a[class^=\"options[\"]:after",
            "*:not(*.green) ~ *",
            "/*!test   comment*/h1, h2",
            "only screen and (min-width: 400px; min-height: 500px)",
            "a[ x = 'y\\'z' i ] /* open",
            "ünïcödé > .☃",
        ];
        for input in inputs {
            assert_eq!(reconstruct(input), input);
        }
    }

    #[test]
    fn test_offsets_are_byte_positions() {
        let lexemes = tokenize("a , b");
        let starts: Vec<usize> = lexemes.iter().map(|l| l.start).collect();
        assert_eq!(starts, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokens("").is_empty());
    }
}
