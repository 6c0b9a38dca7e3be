use std::{fmt, io};
use stache_parser::CompileError;

/// [`Result`][std::result::Result] alias for [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error that can occur during compiling or rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("failed to serialize model: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Fmt(#[from] fmt::Error),
    #[error("no lambda named `{0}`")]
    Lambda(Box<str>),
}

impl Error {
    /// Convert error to [`io::Error`].
    ///
    /// [`CompileError`], serialization error and missing lambda will become
    /// [`io::ErrorKind::InvalidData`].
    pub fn into_io(self) -> io::Error {
        match self {
            Error::Compile(err) => io::Error::new(io::ErrorKind::InvalidData, err),
            Error::Json(err) => io::Error::new(io::ErrorKind::InvalidData, err),
            Error::Io(err) => err,
            Error::Fmt(err) => io::Error::other(err),
            Error::Lambda(name) => {
                io::Error::new(io::ErrorKind::InvalidData, format!("no lambda named `{name}`"))
            }
        }
    }
}
