//! Token definitions.
use std::{fmt, ops::Range};

// ===== Delimiters =====

/// Tag delimiters, `{{` and `}}` by default.
///
/// Changed mid template with `{{=<% %>=}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    start: Box<str>,
    end: Box<str>,
}

impl Delimiters {
    /// Create new [`Delimiters`].
    ///
    /// Returns [`None`] if either marker is empty, contains whitespace or contains `=`.
    pub fn new(start: &str, end: &str) -> Option<Self> {
        fn valid(marker: &str) -> bool {
            !marker.is_empty() && !marker.contains(|ch: char| ch.is_whitespace() || ch == '=')
        }

        match valid(start) && valid(end) {
            true => Some(Self { start: start.into(), end: end.into() }),
            false => None,
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn is_default(&self) -> bool {
        &*self.start == "{{" && &*self.end == "}}"
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self { start: "{{".into(), end: "}}".into() }
    }
}

impl fmt::Display for Delimiters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.start, self.end)
    }
}

// ===== Position =====

/// Line and column of a token, both starts from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const START: Position = Position { line: 1, column: 1 };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// ===== Span =====

/// Byte range of a token in its template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    range: Range<usize>,
}

impl Span {
    pub fn eval<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub(crate) fn range(range: Range<usize>) -> Self {
        Self { range }
    }
}

impl PartialEq<Range<usize>> for Span {
    fn eq(&self, other: &Range<usize>) -> bool {
        &self.range == other
    }
}

// ===== Token =====

/// Newline flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewlineKind {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl NewlineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewlineKind::Lf => "\n",
            NewlineKind::CrLf => "\r\n",
        }
    }
}

/// Tag flavor, decided by the first significant character inside the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `{{name}}`
    Variable,
    /// `{{{name}}}` or `{{&name}}`
    UnescapedVariable,
    /// `{{#name}}`
    SectionStart,
    /// `{{^name}}`
    InvertedSectionStart,
    /// `{{/name}}`
    SectionEnd,
    /// `{{>name}}`
    PartialReference,
    /// `{{<name}}`
    ParentBlockStart,
    /// `{{$name}}`
    ParentBlockOverrideStart,
    /// `{{!comment}}`
    Comment,
}

impl TagKind {
    /// Returns [`Some`] if given char is a tag sigil.
    ///
    /// Triple marker and delimiter sigils are handled by the tokenizer itself.
    pub fn match_sigil(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Self::SectionStart),
            '^' => Some(Self::InvertedSectionStart),
            '/' => Some(Self::SectionEnd),
            '>' => Some(Self::PartialReference),
            '<' => Some(Self::ParentBlockStart),
            '$' => Some(Self::ParentBlockOverrideStart),
            '!' => Some(Self::Comment),
            '&' => Some(Self::UnescapedVariable),
            _ => None,
        }
    }

    /// Returns `true` if a line containing only this tag and whitespace is standalone.
    pub fn is_standalone_eligible(&self) -> bool {
        !matches!(self, Self::Variable | Self::UnescapedVariable)
    }

    /// Returns `true` if this tag opens a scope closed by [`TagKind::SectionEnd`].
    pub fn is_scope_start(&self) -> bool {
        matches!(
            self,
            Self::SectionStart
                | Self::InvertedSectionStart
                | Self::ParentBlockStart
                | Self::ParentBlockOverrideStart
        )
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Variable => f.write_str("variable"),
            Self::UnescapedVariable => f.write_str("unescaped variable"),
            Self::SectionStart => f.write_str("#"),
            Self::InvertedSectionStart => f.write_str("^"),
            Self::SectionEnd => f.write_str("/"),
            Self::PartialReference => f.write_str(">"),
            Self::ParentBlockStart => f.write_str("<"),
            Self::ParentBlockOverrideStart => f.write_str("$"),
            Self::Comment => f.write_str("!"),
        }
    }
}

/// A single template token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Static content, never contains a newline.
    Text(Box<str>),
    /// Line break.
    Newline(NewlineKind),
    /// `{{=<% %>=}}`, previous and next delimiters.
    Delimiters(Delimiters, Delimiters),
    /// Any tag, with its sigil stripped and name trimmed.
    ///
    /// For [`TagKind::Comment`], the name is the whole comment body.
    Tag(Box<str>, TagKind),
}

impl Token {
    /// Returns `true` if the token is a text containing only whitespace.
    pub fn is_whitespace(&self) -> bool {
        match self {
            Token::Text(text) => text.chars().all(char::is_whitespace),
            _ => false,
        }
    }

    /// Returns `true` for [`Token::Tag`] and [`Token::Delimiters`].
    pub fn is_tag(&self) -> bool {
        matches!(self, Token::Tag(..) | Token::Delimiters(..))
    }
}

/// [`Token`] with its location in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    pub token: Token,
    pub position: Position,
    pub span: Span,
}
