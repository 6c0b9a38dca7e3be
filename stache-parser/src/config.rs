//! Compiler configuration.

/// What to do with a reference that cannot be resolved at compile time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Unresolved {
    /// Fail the compilation with [`ErrorKind::UnresolvedReference`][crate::ErrorKind].
    #[default]
    Error,
    /// Compile into [`Lookup::Missing`][stache_core::Lookup], which renders nothing.
    Empty,
}

/// Compiler configuration.
#[derive(Debug, Clone)]
pub struct Config {
    templ_dir: Box<str>,
    prefix: Box<str>,
    suffix: Box<str>,
    unresolved: Unresolved,
    max_depth: usize,
}

impl Config {
    /// Directory of templates, relative to the loader base directory.
    pub fn templ_dir(&self) -> &str {
        &self.templ_dir
    }

    /// Prepended to every template path.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Appended to every template path, e.g. `.mustache`.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn unresolved(&self) -> Unresolved {
        self.unresolved
    }

    /// Ceiling of section nesting plus inclusion depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn with_templ_dir(mut self, templ_dir: impl Into<Box<str>>) -> Self {
        self.templ_dir = templ_dir.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<Box<str>>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<Box<str>>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_unresolved(mut self, unresolved: Unresolved) -> Self {
        self.unresolved = unresolved;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Apply prefix and suffix to a template path.
    pub(crate) fn path(&self, path: &str) -> String {
        format!("{}{path}{}", self.prefix, self.suffix)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templ_dir: String::from("templates").into_boxed_str(),
            prefix: <_>::default(),
            suffix: <_>::default(),
            unresolved: Unresolved::Error,
            max_depth: 64,
        }
    }
}
