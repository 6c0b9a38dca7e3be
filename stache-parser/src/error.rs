use std::{fmt, io};
use stache_core::{Position, TokenizeError};

/// [`Result`][std::result::Result] alias for [`CompileError`].
pub type Result<T, E = CompileError> = std::result::Result<T, E>;

/// An error that can occur during compilation.
///
/// Contains the inclusion chain active when the error occurs, the entry template first.
#[derive(Debug, thiserror::Error)]
#[error("{kind}{}", Chain(.chain))]
pub struct CompileError {
    pub kind: ErrorKind,
    pub chain: Vec<Box<str>>,
}

impl CompileError {
    pub fn new(kind: ErrorKind, chain: Vec<Box<str>>) -> Self {
        Self { kind, chain }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Inclusion chain, rendered as `a -> b -> c`.
    pub fn chain(&self) -> String {
        Chain(&self.chain).to_string().trim_start_matches(", in ").to_owned()
    }
}

impl From<ErrorKind> for CompileError {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, chain: vec![] }
    }
}

/// [`CompileError`] kind.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    #[error("circular template reference `{name}`")]
    CircularTemplate { name: Box<str> },
    #[error("fragment `{fragment}` not found in `{path}`")]
    FragmentNotFound { path: Box<str>, fragment: Box<str> },
    #[error("{position}: cannot resolve `{name}`")]
    UnresolvedReference { name: Box<str>, position: Position },
    #[error("{position}: {}", mismatch(.expected, .found))]
    SectionMismatch {
        expected: Option<Box<str>>,
        found: Option<Box<str>>,
        position: Position,
    },
    #[error("{position}: invalid reference `{name}`")]
    InvalidReference { name: Box<str>, position: Position },
    #[error("failed to load `{path}`: {source}")]
    Load { path: Box<str>, source: io::Error },
    #[error("{position}: exceeding maximum depth of {max_depth}")]
    TooDeep { max_depth: usize, position: Position },
}

impl ErrorKind {
    /// Position of the offending tag, if any.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Tokenize(err) => Some(err.position()),
            Self::UnresolvedReference { position, .. }
            | Self::SectionMismatch { position, .. }
            | Self::InvalidReference { position, .. }
            | Self::TooDeep { position, .. } => Some(*position),
            Self::CircularTemplate { .. }
            | Self::FragmentNotFound { .. }
            | Self::Load { .. } => None,
        }
    }
}

fn mismatch(expected: &Option<Box<str>>, found: &Option<Box<str>>) -> String {
    match (expected, found) {
        (Some(expected), Some(found)) => {
            format!("expected `{{{{/{expected}}}}}`, found `{{{{/{found}}}}}`")
        }
        (Some(expected), None) => format!("unclosed section `{expected}`"),
        (None, Some(found)) => format!("unexpected closing `{found}`"),
        (None, None) => "unbalanced section".to_owned(),
    }
}

struct Chain<'a>(&'a [Box<str>]);

impl fmt::Display for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            match i {
                0 => write!(f, ", in {name}")?,
                _ => write!(f, " -> {name}")?,
            }
        }
        Ok(())
    }
}
