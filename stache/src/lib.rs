//! Ahead-of-time Mustache templating.
//!
//! Templates are compiled once into a reusable [`Program`], partials and parents inlined and
//! references resolved, then rendered against any [`Serialize`][serde::Serialize] model.
//!
//! ```
//! use stache::{Compiler, MemoryLoader, Renderer};
//! use serde_json::json;
//!
//! let loader = MemoryLoader::from([("item", "- {{.}}\n")]);
//! let program = Compiler::new(loader)
//!     .compile("{{#items}}\n{{>item}}\n{{/items}}\n", "list")
//!     .unwrap();
//!
//! let output = Renderer::new().render(&program, &json!({ "items": [1, 2] })).unwrap();
//! assert_eq!(output, "- 1\n- 2\n");
//! ```
//!
//! With the `macros` feature (default), [`program!`] compiles at build time:
//!
//! ```ignore
//! let program = stache::program!(path = "index.html");
//! ```
mod write;
mod escape;
mod format;
mod render;
mod template;
mod error;

pub use write::{FmtWriter, IoWriter, Writer};
pub use escape::{Escape, Escaper, Html, NoEscape};
pub use format::{DefaultFormatter, Formatter};
pub use render::{Lambda, Renderer};
pub use template::Template;
pub use error::{Error, Result};

pub use serde_json::Value;
pub use stache_core::{Lookup, Node, Program, SectionKind};
pub use stache_parser::{
    CompileError, Compiler, Config, ErrorKind, FsLoader, Loader, MemoryLoader, NamedTemplate,
    Schema, Unresolved, compile,
};

#[cfg(feature = "macros")]
pub use stache_macros::program;
