//! Statement tree including nested scope for template statements.
use stache_core::Position;

/// Template statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// Static content, adjacent texts are merged.
    Text(Box<str>),
    /// `{{name}}`, `{{{name}}}` or `{{&name}}`.
    Variable {
        name: Box<str>,
        escape: bool,
        position: Position,
    },
    /// `{{#name}}..{{/name}}` or `{{^name}}..{{/name}}`.
    Section {
        name: Box<str>,
        inverted: bool,
        body: Vec<Stmt>,
        position: Position,
    },
    /// `{{>name}}`, with indentation of a standalone tag.
    Partial {
        name: Box<str>,
        indent: Box<str>,
        position: Position,
    },
    /// `{{<name}}..{{/name}}`.
    Parent {
        name: Box<str>,
        body: Vec<Stmt>,
        position: Position,
    },
    /// `{{$name}}..{{/name}}`.
    Block {
        name: Box<str>,
        body: Vec<Stmt>,
        position: Position,
    },
}

/// Open scope while building the tree.
pub(crate) enum Scope {
    Root { stmts: Vec<Stmt> },
    Section {
        name: Box<str>,
        inverted: bool,
        position: Position,
        stmts: Vec<Stmt>,
    },
    Parent {
        name: Box<str>,
        position: Position,
        stmts: Vec<Stmt>,
    },
    Block {
        name: Box<str>,
        position: Position,
        stmts: Vec<Stmt>,
    },
}

impl Scope {
    pub(crate) fn stack_mut(&mut self) -> &mut Vec<Stmt> {
        match self {
            Self::Root { stmts } => stmts,
            Self::Section { stmts, .. } => stmts,
            Self::Parent { stmts, .. } => stmts,
            Self::Block { stmts, .. } => stmts,
        }
    }

    /// name of the tag opening this scope
    pub(crate) fn name(&self) -> Option<&str> {
        match self {
            Self::Root { .. } => None,
            Self::Section { name, .. } | Self::Parent { name, .. } | Self::Block { name, .. } => {
                Some(name)
            }
        }
    }

    pub(crate) fn position(&self) -> Position {
        match self {
            Self::Root { .. } => Position::START,
            Self::Section { position, .. }
            | Self::Parent { position, .. }
            | Self::Block { position, .. } => *position,
        }
    }

    /// close the scope, [`Scope::Root`] cannot be closed
    pub(crate) fn into_stmt(self) -> Option<Stmt> {
        match self {
            Self::Root { .. } => None,
            Self::Section { name, inverted, position, stmts } => {
                Some(Stmt::Section { name, inverted, body: stmts, position })
            }
            Self::Parent { name, position, stmts } => {
                Some(Stmt::Parent { name, body: stmts, position })
            }
            Self::Block { name, position, stmts } => {
                Some(Stmt::Block { name, body: stmts, position })
            }
        }
    }
}

/// Push a statement, merging adjacent texts.
pub(crate) fn push(stmts: &mut Vec<Stmt>, stmt: Stmt) {
    if let (Some(Stmt::Text(prev)), Stmt::Text(text)) = (stmts.last_mut(), &stmt) {
        let mut merged = String::with_capacity(prev.len() + text.len());
        merged.push_str(prev);
        merged.push_str(text);
        *prev = merged.into_boxed_str();
        return;
    }
    stmts.push(stmt);
}
