//! Scope resolution.
//!
//! Scopes are kept in an arena, each frame links to its parent by index. Resolution walks the
//! value frames from the innermost one outward.
use stache_core::Lookup;

use crate::schema::{Field, Schema};

static ANY: Schema = Schema::Any;

/// A single scope frame.
#[derive(Debug, Clone)]
pub enum Frame {
    /// The model root.
    Root { schema: Schema },
    /// Section value, or list element when iterating.
    Section { schema: Schema },
    /// Boolean test or inverted section, pushes no value.
    Boolean,
    /// Partial, parent or block boundary, pushes no value.
    Enclosed,
}

impl Frame {
    fn schema(&self) -> Option<&Schema> {
        match self {
            Frame::Root { schema } | Frame::Section { schema } => Some(schema),
            Frame::Boolean | Frame::Enclosed => None,
        }
    }
}

#[derive(Debug)]
struct Entry {
    frame: Frame,
    parent: Option<usize>,
}

/// Chain of scope frames.
#[derive(Debug)]
pub struct Context {
    frames: Vec<Entry>,
    current: usize,
}

/// A reference resolved by [`Context::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub lookup: Lookup,
    pub schema: Schema,
}

impl Context {
    /// Create new [`Context`] with [`Frame::Root`].
    pub fn new(schema: Schema) -> Self {
        Self {
            frames: vec![Entry { frame: Frame::Root { schema }, parent: None }],
            current: 0,
        }
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(Entry { frame, parent: Some(self.current) });
        self.current = self.frames.len() - 1;
    }

    /// Pop the innermost frame, the root frame is never popped.
    pub fn pop(&mut self) {
        if let Some(parent) = self.frames[self.current].parent {
            self.frames.truncate(self.current);
            self.current = parent;
        }
    }

    /// Number of frames above the root.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Value frames, innermost first.
    fn values(&self) -> impl Iterator<Item = &Schema> {
        let mut next = Some(self.current);
        std::iter::from_fn(move || {
            let index = next?;
            let entry = &self.frames[index];
            next = entry.parent;
            Some(entry.frame.schema())
        })
        .flatten()
    }

    /// Resolve a dotted reference.
    ///
    /// `.` and `this` are the innermost value frame. The first segment walks outward through
    /// value frames, the rest are direct children. Returns [`None`] if the reference is known
    /// to be absent.
    ///
    /// The reference must not contain empty segments.
    pub fn resolve(&self, name: &str) -> Option<Resolved> {
        if name == "." || name == "this" {
            let schema = self.values().next().cloned().unwrap_or_default();
            return Some(Resolved { lookup: Lookup::Current { up: 0 }, schema });
        }

        let mut segments = name.split('.');
        let first = segments.next()?;

        let (up, mut schema, search) = match first {
            "this" => (0, self.values().next()?, false),
            _ => self.walk(first)?,
        };

        let mut path: Vec<Box<str>> = match first {
            "this" => vec![],
            _ => vec![first.into()],
        };

        for segment in segments {
            schema = match schema.field(segment) {
                Field::Found(schema) => schema,
                Field::Unknown => &ANY,
                Field::Absent => return None,
            };
            path.push(segment.into());
        }

        let lookup = match search {
            true => Lookup::Search { up, path },
            false => Lookup::Frame { up, path },
        };
        Some(Resolved { lookup, schema: schema.clone() })
    }

    /// find the first value frame containing `name`
    ///
    /// returns the frame distance, the schema, and whether it must be searched at render time
    fn walk(&self, name: &str) -> Option<(usize, &Schema, bool)> {
        for (up, schema) in self.values().enumerate() {
            match schema.field(name) {
                Field::Found(schema) => return Some((up, schema, false)),
                Field::Unknown => return Some((up, &ANY, true)),
                Field::Absent => {}
            }
        }
        None
    }
}
