//! Selector and parameter list AST.
//!
//! The model is lossless enough to render a normalized form back out: text
//! runs, escapes and comments are stored raw, and only the whitespace the
//! grammar makes insignificant is dropped during parsing.

/// A parenthesized argument following a functional pseudo-class.
#[derive(Debug, Clone, PartialEq)]
pub enum Arguments {
    /// Argument of a pseudo-class that takes a selector list, e.g. `:not(a, b)`.
    Selectors(Vec<Selector>),
    /// Any other argument, e.g. `:nth-child(2n + 1)`. Raw text pieces with
    /// whitespace runs marked as `None`.
    Raw(Vec<Option<String>>),
}

/// `( ... )` attached to the preceding component of a compound selector.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub arguments: Arguments,
    /// `false` when the input ended before the closing `)`.
    pub closed: bool,
}

/// The value side of an attribute selector.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Unquoted value, raw (may contain escapes).
    Ident(String),
    /// Quoted value. `content` excludes the quotes.
    Quoted {
        quote: char,
        content: String,
        closed: bool,
    },
}

/// Attribute selector: `[name]`, `[name op value]`, `[name op value i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    /// Attribute name, possibly namespaced (`ns|href`).
    pub name: String,
    /// Matcher such as `=`, `~=`, `|=`, `^=`, `$=`, `*=`.
    pub operator: Option<String>,
    pub value: Option<AttributeValue>,
    /// Case-sensitivity flag (`i` / `s`).
    pub modifier: Option<String>,
    /// `false` when the input ended before the closing `]`.
    pub closed: bool,
}

impl AttributeSelector {
    /// Create an attribute selector with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operator: None,
            value: None,
            modifier: None,
            closed: true,
        }
    }
}

/// A single component of a compound selector.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// Universal selector: `*`.
    Universal,
    /// Raw run of type, class, id or pseudo text, e.g. `h1.title:hover`.
    Text(String),
    /// CSS escape sequence, copied verbatim.
    Escape(String),
    /// Block comment, copied verbatim.
    Comment(String),
    /// Attribute selector: `[...]`.
    Attribute(AttributeSelector),
    /// Parenthesized argument of the preceding pseudo-class.
    Group(Group),
}

impl Component {
    /// Returns `true` if this component qualifies the element being matched:
    /// a class, id, pseudo-class/element or attribute selector.
    pub fn is_qualifier(&self) -> bool {
        match self {
            Component::Text(text) => text.starts_with(['.', '#', ':']),
            Component::Attribute(_) => true,
            _ => false,
        }
    }

    /// Returns `true` for components that are pure commentary.
    pub fn is_comment(&self) -> bool {
        matches!(self, Component::Comment(_))
    }
}

/// A combinator between compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (whitespace): `A B`.
    Descendant,
    /// Child combinator: `A > B`.
    Child,
    /// Next-sibling combinator: `A + B`.
    NextSibling,
    /// Subsequent-sibling combinator: `A ~ B`.
    SubsequentSibling,
}

impl Combinator {
    /// Map an explicit combinator character to its variant.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '>' => Some(Combinator::Child),
            '+' => Some(Combinator::NextSibling),
            '~' => Some(Combinator::SubsequentSibling),
            _ => None,
        }
    }

    /// The combinator's source text without surrounding whitespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Combinator::Descendant => " ",
            Combinator::Child => ">",
            Combinator::NextSibling => "+",
            Combinator::SubsequentSibling => "~",
        }
    }
}

/// A single compound selector (sequence of components without combinators).
///
/// For example, `a.external[href]` is one `CompoundSelector` with two
/// components: `Text("a.external")`, `Attribute(href)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector {
    pub components: Vec<Component>,
}

impl CompoundSelector {
    /// Create an empty compound selector.
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Append a component to this compound selector.
    pub fn push(&mut self, component: Component) {
        self.components.push(component);
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns `true` if every component is a comment.
    pub fn is_comment_only(&self) -> bool {
        self.components.iter().all(Component::is_comment)
    }
}

impl Default for CompoundSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// One element in a selector chain: either a compound selector or a combinator.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    /// A compound selector (one or more simple selectors).
    Compound(CompoundSelector),
    /// A combinator between compound selectors.
    Combinator(Combinator),
}

/// A full selector: chain of compound selectors joined by combinators.
///
/// For example, `h1 > p.lead` is a `Selector` with parts:
/// `[Compound(h1), Combinator(Child), Compound(p.lead)]`. A relative selector
/// such as `> p` starts with a combinator.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub parts: Vec<SelectorPart>,
}

impl Selector {
    /// Create an empty selector.
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Returns `true` if the selector has any content besides comments.
    pub fn has_content(&self) -> bool {
        self.parts.iter().any(|part| match part {
            SelectorPart::Compound(compound) => !compound.is_comment_only(),
            SelectorPart::Combinator(_) => true,
        })
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

/// A piece of an at-rule parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterPart {
    /// Run of identifier, number or punctuation text, raw.
    Word(String),
    /// Whitespace run; rendered as at most one space.
    Space,
    /// Block comment, copied verbatim.
    Comment(String),
    /// Quoted string, quotes included.
    Quoted(String),
    /// Parenthesized feature expression, e.g. `(min-width: 400px)`.
    Feature {
        parts: Vec<ParameterPart>,
        closed: bool,
    },
}

/// One comma-separated entry of an at-rule parameter list, e.g.
/// `only screen and (min-width: 400px)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameter {
    pub parts: Vec<ParameterPart>,
}

impl Parameter {
    /// Returns `true` if the entry has any content besides spaces and comments.
    pub fn has_content(&self) -> bool {
        self.parts
            .iter()
            .any(|part| !matches!(part, ParameterPart::Space | ParameterPart::Comment(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_selector_new() {
        let mut cs = CompoundSelector::new();
        assert!(cs.is_empty());
        cs.push(Component::Universal);
        assert!(!cs.is_empty());
        assert!(!cs.is_comment_only());
    }

    #[test]
    fn test_qualifiers() {
        assert!(Component::Text(".a".into()).is_qualifier());
        assert!(Component::Text("#a".into()).is_qualifier());
        assert!(Component::Text(":hover".into()).is_qualifier());
        assert!(Component::Attribute(AttributeSelector::new("href")).is_qualifier());
        assert!(!Component::Text("div".into()).is_qualifier());
        assert!(!Component::Text("|a".into()).is_qualifier());
        assert!(!Component::Comment("/**/".into()).is_qualifier());
        assert!(!Component::Escape("\\31 ".into()).is_qualifier());
    }

    #[test]
    fn test_combinator_from_char() {
        assert_eq!(Combinator::from_char('>'), Some(Combinator::Child));
        assert_eq!(Combinator::from_char('+'), Some(Combinator::NextSibling));
        assert_eq!(Combinator::from_char('~'), Some(Combinator::SubsequentSibling));
        assert_eq!(Combinator::from_char(' '), None);
    }

    #[test]
    fn test_selector_has_content() {
        let mut comment_only = CompoundSelector::new();
        comment_only.push(Component::Comment("/* x */".into()));
        let selector = Selector {
            parts: vec![SelectorPart::Compound(comment_only.clone())],
        };
        assert!(!selector.has_content());

        let mut with_star = comment_only;
        with_star.push(Component::Universal);
        let selector = Selector {
            parts: vec![SelectorPart::Compound(with_star)],
        };
        assert!(selector.has_content());
    }

    #[test]
    fn test_parameter_has_content() {
        let empty = Parameter {
            parts: vec![ParameterPart::Space, ParameterPart::Comment("/**/".into())],
        };
        assert!(!empty.has_content());
        let print = Parameter {
            parts: vec![ParameterPart::Word("print".into())],
        };
        assert!(print.has_content());
    }
}
