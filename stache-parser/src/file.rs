//! The [`File`] type, statement tree of a single template source.
use stache_core::{Position, TagKind, Token, whitespace};

use crate::{
    ErrorKind,
    ast::{self, Scope, Stmt},
};

macro_rules! error {
    ($($tt:tt)*) => {
        return Err(ErrorKind::$($tt)*)
    };
}

/// Content of a template source.
#[derive(Debug)]
pub struct File {
    stmts: Vec<Stmt>,
}

impl File {
    /// Parse template source into statement tree.
    ///
    /// `indent` is inserted at the start of every non standalone line, it is the indentation
    /// of the standalone partial tag including this template.
    pub fn parse(source: &str, indent: &str) -> Result<File, ErrorKind> {
        Visitor::generate(source, indent)
    }

    /// Returns all statements.
    pub fn stmts(&self) -> &[Stmt] {
        &self.stmts
    }

    pub fn into_stmts(self) -> Vec<Stmt> {
        self.stmts
    }
}

struct Visitor<'a> {
    indent: &'a str,
    scopes: Vec<Scope>,
}

impl<'a> Visitor<'a> {
    fn generate(source: &str, indent: &'a str) -> Result<File, ErrorKind> {
        let mut me = Visitor { indent, scopes: vec![Scope::Root { stmts: vec![] }] };

        for line in whitespace::lines(source) {
            let line = line?;

            if !line.is_standalone() && !indent.is_empty() {
                me.push(Stmt::Text(indent.into()));
            }

            for process in line.tokens().iter().filter(|e| e.is_emit()) {
                let position = process.token.position;
                match &process.token.token {
                    Token::Text(text) => me.push(Stmt::Text(text.clone())),
                    Token::Newline(kind) => me.push(Stmt::Text(kind.as_str().into())),
                    Token::Delimiters(..) => {}
                    Token::Tag(name, kind) => {
                        let line_indent = line.is_standalone().then(|| line.indent());
                        me.visit_tag(name, *kind, position, line_indent)?
                    }
                }
            }
        }

        me.finish()
    }

    fn push(&mut self, stmt: Stmt) {
        // root scope is never popped
        if let Some(scope) = self.scopes.last_mut() {
            ast::push(scope.stack_mut(), stmt);
        }
    }

    fn visit_tag(
        &mut self,
        name: &str,
        kind: TagKind,
        position: Position,
        line_indent: Option<&str>,
    ) -> Result<(), ErrorKind> {
        let name: Box<str> = name.into();
        match kind {
            TagKind::Comment => {}
            TagKind::Variable | TagKind::UnescapedVariable => {
                validate(&name, position)?;
                self.push(Stmt::Variable { name, escape: kind == TagKind::Variable, position });
            }
            TagKind::SectionStart | TagKind::InvertedSectionStart => {
                validate(&name, position)?;
                let inverted = kind == TagKind::InvertedSectionStart;
                self.scopes.push(Scope::Section { name, inverted, position, stmts: vec![] });
            }
            TagKind::ParentBlockStart => {
                self.scopes.push(Scope::Parent { name, position, stmts: vec![] });
            }
            TagKind::ParentBlockOverrideStart => {
                self.scopes.push(Scope::Block { name, position, stmts: vec![] });
            }
            TagKind::PartialReference => {
                // only a standalone partial is indented
                let indent = match line_indent {
                    Some(line_indent) => format!("{}{line_indent}", self.indent).into_boxed_str(),
                    None => <_>::default(),
                };
                self.push(Stmt::Partial { name, indent, position });
            }
            TagKind::SectionEnd => self.visit_end(name, position)?,
        }
        Ok(())
    }

    fn visit_end(&mut self, name: Box<str>, position: Position) -> Result<(), ErrorKind> {
        let expected = match self.scopes.last().and_then(Scope::name) {
            Some(expected) => expected,
            None => error!(SectionMismatch { expected: None, found: Some(name), position }),
        };

        if expected != &*name {
            error!(SectionMismatch { expected: Some(expected.into()), found: Some(name), position })
        }

        let Some(scope) = self.scopes.pop() else {
            error!(SectionMismatch { expected: None, found: Some(name), position })
        };
        if let Some(stmt) = scope.into_stmt() {
            self.push(stmt);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<File, ErrorKind> {
        match self.scopes.pop() {
            Some(Scope::Root { stmts }) => Ok(File { stmts }),
            Some(scope) => error!(SectionMismatch {
                expected: scope.name().map(Into::into),
                found: None,
                position: scope.position(),
            }),
            None => Ok(File { stmts: vec![] }),
        }
    }
}

/// dotted name must not contain empty segment
fn validate(name: &str, position: Position) -> Result<(), ErrorKind> {
    if name != "." && name.split('.').any(str::is_empty) {
        error!(InvalidReference { name: name.into(), position })
    }
    Ok(())
}
