//! The template tokenizer.
//!
//! ```text
//! Hi {{#user}}{{name}}{{/user}}\n
//!
//! Text("Hi "), Tag("user", SectionStart), Tag("name", Variable), Tag("user", SectionEnd),
//! Newline(Lf)
//! ```
use crate::{
    Delimiters, NewlineKind, Position, PositionedToken, Result, Span, TagKind, Token,
    TokenizeError,
};

macro_rules! error {
    ($($tt:tt)*) => {
        return Err(TokenizeError::$($tt)*)
    };
}

/// A tokenizer where the source ownership is hold by the caller.
///
/// Yields [`PositionedToken`] lazily. The first error ends the iteration.
pub struct Tokenizer<'a> {
    source: &'a str,
    offset: usize,
    position: Position,
    delimiters: Delimiters,
    state: TokenizeState,
}

#[derive(Debug)]
enum TokenizeState {
    Lexing,
    End,
}

impl<'a> Tokenizer<'a> {
    /// Create new [`Tokenizer`] with default delimiters.
    pub fn new(source: &'a str) -> Tokenizer<'a> {
        Tokenizer {
            source,
            offset: 0,
            position: Position::START,
            delimiters: Delimiters::default(),
            state: TokenizeState::Lexing,
        }
    }

    /// Currently active delimiters.
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// advance `len` bytes, tracking line and column
    fn bump(&mut self, len: usize) {
        for ch in self.source[self.offset..self.offset + len].chars() {
            if ch == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
        self.offset += len;
    }

    fn newline(&mut self) -> Option<NewlineKind> {
        let rest = self.rest();
        let kind = match () {
            _ if rest.starts_with('\n') => NewlineKind::Lf,
            _ if rest.starts_with("\r\n") => NewlineKind::CrLf,
            _ => return None,
        };
        self.bump(kind.as_str().len());
        Some(kind)
    }

    /// collect text until newline, opening delimiter, or eof
    ///
    /// the caller must ensure that current offset is neither
    fn text(&mut self) -> Token {
        let rest = self.rest();
        let end = {
            let open = self.delimiters.start();
            rest.char_indices()
                .find(|(i, ch)| {
                    *ch == '\n' || rest[*i..].starts_with("\r\n") || rest[*i..].starts_with(open)
                })
                .map_or(rest.len(), |(i, _)| i)
        };
        debug_assert!(end > 0);
        self.bump(end);
        Token::Text(rest[..end].into())
    }

    /// collect a tag
    ///
    /// the caller must ensure that current offset is an opening delimiter
    fn tag(&mut self, position: Position) -> Result<Token> {
        let open = self.delimiters.start().len();
        let close = self.delimiters.end().to_owned();
        let body = &self.source[self.offset + open..];
        let lead = body.len() - body.trim_start().len();

        match body[lead..].chars().next() {
            Some('=') => {
                let expected = format!("={close}");
                let inner_start = lead + 1;
                let Some(end) = body[inner_start..].find(&expected) else {
                    error!(UnclosedTag { position, expected: expected.into() })
                };
                let inner = &body[inner_start..inner_start + end];
                let mut markers = inner.split_whitespace();
                let next = match (markers.next(), markers.next(), markers.next()) {
                    (Some(start), Some(end), None) => Delimiters::new(start, end),
                    _ => None,
                };
                let Some(next) = next else {
                    error!(InvalidDelimiters { position, found: inner.trim().into() })
                };

                self.bump(open + inner_start + end + expected.len());
                let prev = std::mem::replace(&mut self.delimiters, next.clone());
                Ok(Token::Delimiters(prev, next))
            }
            Some('{') => {
                let expected = format!("}}{close}");
                let inner_start = lead + 1;
                let Some(end) = body[inner_start..].find(&expected) else {
                    match body.contains(&close) {
                        true => error!(UnbalancedTriple { position }),
                        false => error!(UnclosedTag { position, expected: expected.into() }),
                    }
                };
                let name = body[inner_start..inner_start + end].trim();
                validate(name, TagKind::UnescapedVariable, position)?;

                self.bump(open + inner_start + end + expected.len());
                Ok(Token::Tag(name.into(), TagKind::UnescapedVariable))
            }
            _ => {
                let Some(end) = body.find(&close) else {
                    error!(UnclosedTag { position, expected: close.into() })
                };
                let inner = body[..end].trim();
                let (name, kind) = match inner.chars().next().and_then(TagKind::match_sigil) {
                    // all sigils are single byte
                    Some(kind) => (inner[1..].trim(), kind),
                    None => (inner, TagKind::Variable),
                };
                if kind != TagKind::Comment {
                    validate(name, kind, position)?;
                }

                self.bump(open + end + close.len());
                Ok(Token::Tag(name.into(), kind))
            }
        }
    }
}

fn validate(name: &str, kind: TagKind, position: Position) -> Result<()> {
    match () {
        _ if name.is_empty() => error!(EmptyName { position, kind }),
        _ if name.contains(char::is_whitespace) => {
            error!(InvalidName { position, name: name.into() })
        }
        _ => Ok(()),
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<PositionedToken>;

    fn next(&mut self) -> Option<Self::Item> {
        if matches!(self.state, TokenizeState::End) {
            return None;
        }

        if self.offset >= self.source.len() {
            self.state = TokenizeState::End;
            return None;
        }

        let start = self.offset;
        let position = self.position;

        let token = if let Some(kind) = self.newline() {
            Ok(Token::Newline(kind))
        } else if self.rest().starts_with(self.delimiters.start()) {
            self.tag(position)
        } else {
            Ok(self.text())
        };

        match token {
            Ok(token) => Some(Ok(PositionedToken {
                token,
                position,
                span: Span::range(start..self.offset),
            })),
            Err(err) => {
                self.state = TokenizeState::End;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        Tokenizer::new(src)
            .map(|token| token.map(|e| e.token))
            .collect::<Result<_>>()
            .unwrap()
    }

    fn tag(name: &str, kind: TagKind) -> Token {
        Token::Tag(name.into(), kind)
    }

    fn text(value: &str) -> Token {
        Token::Text(value.into())
    }

    #[test]
    fn basic() {
        assert_eq!(
            tokens("Hello {{ name }}!\n"),
            vec![
                text("Hello "),
                tag("name", TagKind::Variable),
                text("!"),
                Token::Newline(NewlineKind::Lf),
            ]
        );
    }

    #[test]
    fn sigils() {
        use TagKind::*;
        assert_eq!(
            tokens("{{#a}}{{^b}}{{/c}}{{>d}}{{<e}}{{$f}}{{! g h }}{{&i}}{{{j}}}{{ # k }}"),
            vec![
                tag("a", SectionStart),
                tag("b", InvertedSectionStart),
                tag("c", SectionEnd),
                tag("d", PartialReference),
                tag("e", ParentBlockStart),
                tag("f", ParentBlockOverrideStart),
                tag("g h", Comment),
                tag("i", UnescapedVariable),
                tag("j", UnescapedVariable),
                tag("k", SectionStart),
            ]
        );
    }

    #[test]
    fn delimiters() {
        let erb = Delimiters::new("<%", "%>").unwrap();
        assert_eq!(
            tokens("{{=<% %>=}}<% x %>{{y}}<%={{ }}=%>{{z}}"),
            vec![
                Token::Delimiters(Delimiters::default(), erb.clone()),
                tag("x", TagKind::Variable),
                text("{{y}}"),
                Token::Delimiters(erb, Delimiters::default()),
                tag("z", TagKind::Variable),
            ]
        );
    }

    #[test]
    fn single_char_delimiters() {
        let pipe = Delimiters::new("|", "|").unwrap();
        assert_eq!(
            tokens("{{= | | =}}\n| hello |"),
            vec![
                Token::Delimiters(Delimiters::default(), pipe),
                Token::Newline(NewlineKind::Lf),
                tag("hello", TagKind::Variable),
            ]
        );
    }

    #[test]
    fn newlines() {
        assert_eq!(
            tokens("a\r\nb\rc\n"),
            vec![
                text("a"),
                Token::Newline(NewlineKind::CrLf),
                text("b\rc"),
                Token::Newline(NewlineKind::Lf),
            ]
        );
    }

    #[test]
    fn positions() {
        let src = "a\n  {{ x }}\n{{! multi\nline }}{{y}}";
        let tokens = Tokenizer::new(src).collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(tokens[3].token, tag("x", TagKind::Variable));
        assert_eq!(tokens[3].position, Position { line: 2, column: 3 });
        assert_eq!(tokens[3].span.eval(src), "{{ x }}");
        assert_eq!(tokens[5].position, Position { line: 3, column: 1 });
        assert_eq!(tokens[6].position, Position { line: 4, column: 8 });
    }

    #[test]
    fn errors() {
        fn error(src: &str) -> TokenizeError {
            let mut tokenizer = Tokenizer::new(src);
            let err = tokenizer.find_map(|e| e.err()).unwrap();
            assert!(tokenizer.next().is_none());
            err
        }

        assert!(matches!(error("ok {{ name"), TokenizeError::UnclosedTag { .. }));
        assert_eq!(error("ok\n {{ name").position(), Position { line: 2, column: 2 });
        assert!(matches!(error("{{#}}"), TokenizeError::EmptyName { .. }));
        assert!(matches!(error("{{a b}}"), TokenizeError::InvalidName { .. }));
        assert!(matches!(error("{{{x}}"), TokenizeError::UnbalancedTriple { .. }));
        assert!(matches!(error("{{=<%=}}"), TokenizeError::InvalidDelimiters { .. }));
        assert!(matches!(error("{{=<% = %>=}}"), TokenizeError::InvalidDelimiters { .. }));
    }
}
