use crate::Position;

/// [`Result`][std::result::Result] alias for [`TokenizeError`].
pub type Result<T,E = TokenizeError> = core::result::Result<T,E>;

/// An error that may occur during tokenizing in [`Tokenizer`][super::Tokenizer].
///
/// Tokenizer does not recover, the whole template is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    #[error("{position}: unclosed tag, expected `{expected}`")]
    UnclosedTag { position: Position, expected: Box<str> },
    #[error("{position}: `{kind}` tag requires a name")]
    EmptyName { position: Position, kind: crate::TagKind },
    #[error("{position}: invalid tag name `{name}`")]
    InvalidName { position: Position, name: Box<str> },
    #[error("{position}: invalid delimiters `{found}`, expected `=<start> <end>=`")]
    InvalidDelimiters { position: Position, found: Box<str> },
    #[error("{position}: unbalanced triple mustache, expected `}}` before closing delimiter")]
    UnbalancedTriple { position: Position },
    #[error("{position}: fragment `{name}` begins again before its end anchor")]
    NestedFragment { position: Position, name: Box<str> },
}

impl TokenizeError {
    /// Position of the offending tag.
    pub fn position(&self) -> Position {
        match self {
            Self::UnclosedTag { position, .. }
            | Self::EmptyName { position, .. }
            | Self::InvalidName { position, .. }
            | Self::InvalidDelimiters { position, .. }
            | Self::UnbalancedTriple { position }
            | Self::NestedFragment { position, .. } => *position,
        }
    }
}
