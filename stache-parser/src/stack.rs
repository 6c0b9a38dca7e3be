//! The [`TemplateStack`] type.
use std::ops::{Deref, DerefMut};

use stache_core::Position;

use crate::{CompileError, ErrorKind};

/// Chain of templates currently being compiled, the entry template first.
///
/// A name can only appear once, which prevents circular inclusion.
#[derive(Debug, Default)]
pub struct TemplateStack {
    frames: Vec<Frame>,
}

#[derive(Debug)]
struct Frame {
    name: Box<str>,
    /// where the template is referenced, `None` for the entry template
    site: Option<Position>,
}

impl TemplateStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a template, the returned guard pops it when dropped.
    ///
    /// Returns [`ErrorKind::CircularTemplate`] if `name` is already in the stack.
    pub fn push(
        &mut self,
        name: &str,
        site: Option<Position>,
    ) -> Result<StackGuard<'_>, CompileError> {
        if self.contains(name) {
            let mut chain = self.chain();
            chain.push(name.into());
            return Err(CompileError::new(ErrorKind::CircularTemplate { name: name.into() }, chain));
        }
        self.frames.push(Frame { name: name.into(), site });
        Ok(StackGuard { stack: self })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.frames.iter().any(|e| &*e.name == name)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Name of the template currently compiled.
    pub fn current(&self) -> Option<&str> {
        self.frames.last().map(|e| &*e.name)
    }

    /// Position where the current template is referenced.
    pub fn site(&self) -> Option<Position> {
        self.frames.last().and_then(|e| e.site)
    }

    /// Names of all templates, the entry template first.
    pub fn chain(&self) -> Vec<Box<str>> {
        self.frames.iter().map(|e| e.name.clone()).collect()
    }

    /// Attach current chain to an error.
    pub fn error(&self, kind: impl Into<ErrorKind>) -> CompileError {
        CompileError::new(kind.into(), self.chain())
    }
}

/// Pops the pushed template when dropped.
pub struct StackGuard<'a> {
    stack: &'a mut TemplateStack,
}

impl Deref for StackGuard<'_> {
    type Target = TemplateStack;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl DerefMut for StackGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}

impl Drop for StackGuard<'_> {
    fn drop(&mut self) {
        self.stack.frames.pop();
    }
}
