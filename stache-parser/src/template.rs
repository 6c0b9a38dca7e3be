//! The [`NamedTemplate`] type.

/// A template registered with a name, referenced as `{{> name}}` or `{{< name}}`.
///
/// Identity is by name only.
#[derive(Debug, Clone)]
pub enum NamedTemplate {
    /// Template loaded from a path, may contain a `#fragment` suffix.
    File { name: Box<str>, path: Box<str> },
    /// Template source given directly.
    Inline { name: Box<str>, text: Box<str> },
}

impl NamedTemplate {
    pub fn file(name: impl Into<Box<str>>, path: impl Into<Box<str>>) -> Self {
        Self::File { name: name.into(), path: path.into() }
    }

    pub fn inline(name: impl Into<Box<str>>, text: impl Into<Box<str>>) -> Self {
        Self::Inline { name: name.into(), text: text.into() }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Inline { name, .. } => name,
        }
    }
}

impl PartialEq for NamedTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for NamedTemplate {}

impl PartialEq<str> for NamedTemplate {
    fn eq(&self, other: &str) -> bool {
        self.name() == other
    }
}
