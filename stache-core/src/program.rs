//! The render program, output of template compilation.
use std::fmt;

/// A compiled template.
///
/// All partials and parents are already inlined, all references are already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    name: Box<str>,
    nodes: Vec<Node>,
}

impl Program {
    pub fn new(name: impl Into<Box<str>>, nodes: Vec<Node>) -> Program {
        Program { name: name.into(), nodes }
    }

    /// Name of the entry template.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Total number of nodes, including nested ones.
    pub fn len(&self) -> usize {
        self.nodes.iter().map(Node::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A single program instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Static content.
    Text(Box<str>),
    /// `{{name}}` when `escape` is true, `{{{name}}}` or `{{&name}}` otherwise.
    Variable { lookup: Lookup, escape: bool },
    /// `{{#name}}` or `{{^name}}`.
    Section {
        lookup: Lookup,
        kind: SectionKind,
        body: Vec<Node>,
    },
    /// `{{#name}}` where `name` is a registered lambda, the body is rendered with the current
    /// value then given to the lambda.
    Lambda { name: Box<str>, body: Vec<Node> },
}

impl Node {
    fn len(&self) -> usize {
        match self {
            Node::Text(_) | Node::Variable { .. } => 1,
            Node::Section { body, .. } | Node::Lambda { body, .. } => {
                1 + body.iter().map(Node::len).sum::<usize>()
            }
        }
    }
}

/// How a section treats its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Known list, body runs once per element with the element pushed.
    Iterate,
    /// Known object or scalar, body runs once with the value pushed.
    With,
    /// Known boolean, nothing pushed.
    Condition,
    /// Body runs once when the value is falsey, nothing pushed.
    Inverted,
    /// Unknown shape, decided at render time. A value is always pushed, `true` pushes the
    /// current value again.
    Dynamic,
}

/// A resolved reference.
///
/// `up` counts value frames outward from the innermost one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// `.` or `this`.
    Current { up: usize },
    /// Resolved at compile time, direct child lookups from the value frame.
    Frame { up: usize, path: Vec<Box<str>> },
    /// First segment is searched outward at render time starting from the value frame, the
    /// rest are direct child lookups.
    Search { up: usize, path: Vec<Box<str>> },
    /// Unresolved reference, renders as empty and is falsey.
    Missing,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn path(f: &mut fmt::Formatter<'_>, path: &[Box<str>]) -> fmt::Result {
            for (i, segment) in path.iter().enumerate() {
                if i != 0 {
                    f.write_str(".")?;
                }
                f.write_str(segment)?;
            }
            Ok(())
        }

        match self {
            Lookup::Current { up } => write!(f, "frame({up}).this"),
            Lookup::Frame { up, path: p } => {
                write!(f, "frame({up}).")?;
                path(f, p)
            }
            Lookup::Search { up, path: p } => {
                write!(f, "search({up}).")?;
                path(f, p)
            }
            Lookup::Missing => f.write_str("missing"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn len() {
        let program = Program::new("t", vec![
            Node::Text("a".into()),
            Node::Section {
                lookup: Lookup::Missing,
                kind: SectionKind::Dynamic,
                body: vec![Node::Variable { lookup: Lookup::Current { up: 0 }, escape: true }],
            },
        ]);
        assert_eq!(program.len(), 3);
        assert_eq!(program.name(), "t");
    }

    #[test]
    fn display() {
        let lookup = Lookup::Search { up: 1, path: vec!["a".into(), "b".into()] };
        assert_eq!(lookup.to_string(), "search(1).a.b");
        assert_eq!(Lookup::Current { up: 0 }.to_string(), "frame(0).this");
    }
}
