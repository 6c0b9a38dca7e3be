//! The [`stache`][1] template tokenizer.
//!
//! This crate contains the leaf of template compilation, it does not resolve anything:
//!
//! - [`Tokenizer`], split a template source into [`PositionedToken`]s
//! - [`whitespace`], group tokens by line and hide standalone lines
//! - [`fragment`], extract a region bounded by `{{! begin:NAME }}` and `{{! end:NAME }}`
//! - [`Program`], the render program produced by [`stache-parser`][2]
//!
//! ```text
//! Hello {{ name }}
//! ```
//!
//! [`Tokenizer`] will yield `Text("Hello ")` and `Tag("name", Variable)`.
//!
//! [1]: <https://docs.rs/stache>
//! [2]: <https://docs.rs/stache-parser>
mod syntax;
mod tokenizer;
mod error;
mod program;

pub mod whitespace;
pub mod fragment;

pub use syntax::{Delimiters, NewlineKind, Position, PositionedToken, Span, TagKind, Token};
pub use tokenizer::Tokenizer;
pub use error::{TokenizeError, Result};
pub use whitespace::{Hint, Line, Lines, ProcessToken};
pub use program::{Lookup, Node, Program, SectionKind};
