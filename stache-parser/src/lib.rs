//! The [`stache`] template compiler.
//!
//! Compiles a template source, including all referenced partials and parents, into a
//! [`Program`] ahead of rendering.
//!
//! # Pipeline
//!
//! - [`Tokenizer`] and [`Lines`] from [`stache_core`], split source into normalized lines
//! - [`File`], build the statement tree, balancing sections
//! - [`Compiler`], visit statements resolving every reference in the scope [`Context`], and
//!   inline partials and parents through the [`TemplateStack`]
//!
//! # Scope resolution
//!
//! With a [`Schema`] describing the model, references are resolved at compile time into a
//! fixed frame distance. A model part described as [`Schema::Any`] is searched at render time
//! instead.
//!
//! ```
//! use stache_parser::{Compiler, MemoryLoader, Schema};
//! use stache_core::{Lookup, Node};
//!
//! let schema = Schema::object([("name", Schema::Scalar)]);
//! let program = Compiler::new(MemoryLoader::new())
//!     .schema(schema)
//!     .compile("{{name}}", "index")
//!     .unwrap();
//!
//! assert_eq!(
//!     program.nodes(),
//!     [Node::Variable {
//!         lookup: Lookup::Frame { up: 0, path: vec!["name".into()] },
//!         escape: true,
//!     }]
//! );
//! ```
//!
//! # Partials
//!
//! A partial reference is resolved in order:
//!
//! - a registered [`NamedTemplate`]
//! - a path given to the [`Loader`], optionally with `#fragment` suffix
//!
//! # Code generation
//!
//! With the `codegen` feature, [`codegen::generate`] lowers a [`Program`] into rust tokens.
//!
//! [`stache`]: <https://docs.rs/stache>
//! [`Tokenizer`]: stache_core::Tokenizer
//! [`Lines`]: stache_core::Lines
//! [`Program`]: stache_core::Program
//! [`File`]: file::File
//! [`Context`]: context::Context

pub mod ast;
pub mod file;
pub mod context;

// ===== Input =====
mod config;
mod template;
mod schema;
mod loader;

// ===== Compile =====
mod stack;
mod compile;
mod error;

// ===== Output =====
#[cfg(feature = "codegen")]
pub mod codegen;

pub use config::{Config, Unresolved};
pub use template::NamedTemplate;
pub use schema::{Field, Schema};
pub use loader::{FsLoader, Loader, MemoryLoader};
pub use stack::{StackGuard, TemplateStack};
pub use compile::{Compiler, compile};
pub use error::{CompileError, ErrorKind, Result};
