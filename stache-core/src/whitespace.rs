//! Standalone line normalization.
//!
//! A line containing a single standalone eligible tag and nothing else but whitespace is
//! removed from the output entirely, only the tag itself is kept.
//!
//! ```text
//! Begin.
//!   {{#items}}
//! End.
//! ```
//!
//! The second line contributes nothing to the output.
use std::mem;

use crate::{PositionedToken, Result, Token, Tokenizer};

/// Whether a token contributes to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    Emit,
    Ignore,
}

/// [`PositionedToken`] with its [`Hint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessToken {
    pub token: PositionedToken,
    pub hint: Hint,
}

impl ProcessToken {
    pub fn is_emit(&self) -> bool {
        self.hint == Hint::Emit
    }
}

/// A single physical line, including its trailing newline if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    tokens: Vec<ProcessToken>,
    standalone: bool,
}

impl Line {
    fn new(tokens: Vec<PositionedToken>) -> Line {
        let standalone = is_standalone(&tokens);
        let tokens = tokens
            .into_iter()
            .map(|token| {
                let hint = match standalone && !token.token.is_tag() {
                    true => Hint::Ignore,
                    false => Hint::Emit,
                };
                ProcessToken { token, hint }
            })
            .collect();
        Line { tokens, standalone }
    }

    pub fn tokens(&self) -> &[ProcessToken] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<ProcessToken> {
        self.tokens
    }

    pub fn is_standalone(&self) -> bool {
        self.standalone
    }

    /// Leading whitespace of a standalone line.
    ///
    /// This is the indentation of a standalone partial, empty for any other line.
    pub fn indent(&self) -> &str {
        if !self.standalone {
            return "";
        }
        match self.tokens.first().map(|e| &e.token.token) {
            Some(Token::Text(text)) => text,
            _ => "",
        }
    }

    /// Byte offset of the line start.
    pub fn start(&self) -> usize {
        self.tokens.first().map_or(0, |e| e.token.span.start())
    }

    /// Byte offset of the line end, after the newline if any.
    pub fn end(&self) -> usize {
        self.tokens.last().map_or(0, |e| e.token.span.end())
    }
}

/// exactly one eligible tag, everything else is whitespace
fn is_standalone(tokens: &[PositionedToken]) -> bool {
    let mut tags = 0;
    for token in tokens {
        match &token.token {
            Token::Newline(_) => {}
            Token::Text(_) if token.token.is_whitespace() => {}
            Token::Text(_) => return false,
            Token::Delimiters(..) => tags += 1,
            Token::Tag(_, kind) if kind.is_standalone_eligible() => tags += 1,
            Token::Tag(..) => return false,
        }
    }
    tags == 1
}

/// Split template source into normalized [`Line`]s.
pub fn lines(source: &str) -> Lines<'_> {
    Lines::new(Tokenizer::new(source))
}

/// Iterator adapter buffering tokens one line at a time.
///
/// The first error ends the iteration.
pub struct Lines<'a> {
    tokens: Tokenizer<'a>,
    buffer: Vec<PositionedToken>,
    done: bool,
}

impl<'a> Lines<'a> {
    pub fn new(tokens: Tokenizer<'a>) -> Self {
        Self { tokens, buffer: vec![], done: false }
    }
}

impl Iterator for Lines<'_> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.tokens.next() {
                Some(Ok(token)) => {
                    let newline = matches!(token.token, Token::Newline(_));
                    self.buffer.push(token);
                    if newline {
                        return Some(Ok(Line::new(mem::take(&mut self.buffer))));
                    }
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                None => {
                    self.done = true;
                    if self.buffer.is_empty() {
                        return None;
                    }
                    return Some(Ok(Line::new(mem::take(&mut self.buffer))));
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    /// concat the raw text of every emitted token
    fn emitted(source: &str) -> String {
        lines(source)
            .map(Result::unwrap)
            .flat_map(Line::into_tokens)
            .filter(ProcessToken::is_emit)
            .map(|e| e.token.span.eval(source).to_owned())
            .collect()
    }

    fn standalone(source: &str) -> Vec<bool> {
        lines(source).map(|e| e.unwrap().is_standalone()).collect()
    }

    #[test]
    fn standalone_comment() {
        let src = "Begin.\n{{! Comment Block! }}\nEnd.\n";
        assert_eq!(standalone(src), [false, true, false]);
        assert_eq!(emitted(src), "Begin.\n{{! Comment Block! }}End.\n");
    }

    #[test]
    fn indented_sections() {
        let src = "  {{#a}}\n  x\n\t{{/a}}\r\n";
        assert_eq!(standalone(src), [true, false, true]);
        assert_eq!(emitted(src), "{{#a}}  x\n{{/a}}");
    }

    #[test]
    fn variable_is_never_standalone() {
        let src = "  {{a}}\n  {{{b}}}\n";
        assert_eq!(standalone(src), [false, false]);
        assert_eq!(emitted(src), src);
    }

    #[test]
    fn content_beside_tag() {
        assert_eq!(standalone("{{#a}} b\n"), [false]);
        assert_eq!(standalone("{{#a}}{{/a}}\n"), [false]);
        assert_eq!(standalone("{{=[ ]=}}[text]"), [false]);
    }

    #[test]
    fn delimiters() {
        let src = "  {{= | | =}}\n|x|\n";
        assert_eq!(standalone(src), [true, false]);
        assert_eq!(emitted(src), "{{= | | =}}|x|\n");
    }

    #[test]
    fn last_line() {
        let src = "x\n  {{/a}}";
        assert_eq!(standalone(src), [false, true]);
        assert_eq!(emitted(src), "x\n{{/a}}");
    }

    #[test]
    fn multiline_comment() {
        let src = "\t{{! a\nb }}\nc";
        assert_eq!(standalone(src), [true, false]);
        assert_eq!(emitted(src), "{{! a\nb }}c");
    }

    #[test]
    fn indent() {
        let src = "  {{>p}}\n  {{a}}\n";
        let lines = lines(src).collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(lines[0].indent(), "  ");
        assert_eq!(lines[1].indent(), "");
        assert_eq!((lines[1].start(), lines[1].end()), (9, src.len()));
    }

    #[test]
    fn error_ends_iteration() {
        let mut lines = lines("ok\n{{ unclosed\nrest\n");
        assert!(lines.next().unwrap().is_ok());
        assert!(lines.next().unwrap().is_err());
        assert!(lines.next().is_none());
    }
}
