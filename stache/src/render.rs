//! The [`Renderer`], executes a [`Program`] against a model.
use std::{collections::HashMap, fmt, sync::Arc};

use serde::Serialize;
use serde_json::Value;
use stache_core::{Lookup, Node, Program, SectionKind};

use crate::{
    Error, Result, Writer,
    escape::{Escaper, Html},
    format::{DefaultFormatter, Formatter},
};

/// Render a [`Program`] with an [`Escaper`] and a [`Formatter`].
///
/// ```
/// use stache::{Renderer, NoEscape, compile, MemoryLoader};
/// use serde_json::json;
///
/// let program = compile("<{{name}}>", "index", MemoryLoader::new()).unwrap();
/// let model = json!({ "name": "<b>" });
///
/// assert_eq!(Renderer::new().render(&program, &model).unwrap(), "<&lt;b&gt;>");
/// assert_eq!(Renderer::new().escaper(NoEscape).render(&program, &model).unwrap(), "<<b>>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer<E = Html, F = DefaultFormatter> {
    escaper: E,
    formatter: F,
    lambdas: Lambdas,
}

// ===== Lambda =====

/// A function called for a `{{#name}}..{{/name}}` section compiled as a lambda.
///
/// See [`Compiler::lambda`][stache_parser::Compiler::lambda].
#[derive(Clone)]
pub enum Lambda {
    /// Called with the current value, the output is escaped.
    Value(Arc<dyn Fn(&Value) -> String + Send + Sync>),
    /// Called with the current value and the rendered body, the output is written as is.
    Wrap(Arc<dyn Fn(&Value, &str) -> String + Send + Sync>),
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lambda::Value(_) => f.write_str("Lambda::Value"),
            Lambda::Wrap(_) => f.write_str("Lambda::Wrap"),
        }
    }
}

type Lambdas = HashMap<Box<str>, Lambda>;

impl Renderer {
    pub fn new() -> Renderer {
        Renderer::default()
    }
}

impl<E, F> Renderer<E, F> {
    /// Replace the escaper applied to `{{name}}`.
    pub fn escaper<E2: Escaper>(self, escaper: E2) -> Renderer<E2, F> {
        Renderer { escaper, formatter: self.formatter, lambdas: self.lambdas }
    }

    /// Replace the value formatter.
    pub fn formatter<F2: Formatter>(self, formatter: F2) -> Renderer<E, F2> {
        Renderer { escaper: self.escaper, formatter, lambdas: self.lambdas }
    }

    /// Register a [`Lambda::Value`].
    ///
    /// ```
    /// use stache::{Compiler, MemoryLoader, Renderer};
    /// use serde_json::json;
    ///
    /// let program = Compiler::new(MemoryLoader::new())
    ///     .lambda("prefix")
    ///     .compile("{{#prefix}}{{/prefix}}", "index")
    ///     .unwrap();
    /// let renderer = Renderer::new().lambda("prefix", |value| format!("Sir {}", value["name"]));
    ///
    /// assert_eq!(renderer.render(&program, &json!({ "name": 1 })).unwrap(), "Sir 1");
    /// ```
    pub fn lambda<L>(mut self, name: impl Into<Box<str>>, lambda: L) -> Self
    where
        L: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.lambdas.insert(name.into(), Lambda::Value(Arc::new(lambda)));
        self
    }

    /// Register a [`Lambda::Wrap`].
    pub fn wrap_lambda<L>(mut self, name: impl Into<Box<str>>, lambda: L) -> Self
    where
        L: Fn(&Value, &str) -> String + Send + Sync + 'static,
    {
        self.lambdas.insert(name.into(), Lambda::Wrap(Arc::new(lambda)));
        self
    }
}

impl<E, F> Renderer<E, F>
where
    E: Escaper,
    F: Formatter,
{
    pub fn render(&self, program: &Program, model: &Value) -> Result<String> {
        let mut buffer = String::with_capacity(128);
        self.render_into(program, model, &mut buffer)?;
        Ok(buffer)
    }

    /// Serialize `model` into [`Value`] then render it.
    pub fn render_model<T>(&self, program: &Program, model: &T) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        let model = serde_json::to_value(model)?;
        self.render(program, &model)
    }

    pub fn render_into<W>(&self, program: &Program, model: &Value, f: &mut W) -> Result<()>
    where
        W: Writer,
    {
        let mut stack = Vec::with_capacity(8);
        stack.push(model);
        self.nodes(program.nodes(), &mut stack, f)
    }

    fn nodes<'v, W: Writer>(
        &self,
        nodes: &[Node],
        stack: &mut Vec<&'v Value>,
        f: &mut W,
    ) -> Result<()> {
        for node in nodes {
            match node {
                Node::Text(text) => f.write_str(text)?,
                Node::Variable { lookup, escape } => {
                    let Some(value) = lookup_value(lookup, stack) else {
                        continue;
                    };
                    let value = self.formatter.format(value);
                    match *escape {
                        true => self.escaper.escape(&value, f)?,
                        false => f.write_str(&value)?,
                    }
                }
                Node::Section { lookup, kind, body } => {
                    let value = lookup_value(lookup, stack);
                    self.section(value, *kind, body, stack, f)?;
                }
                Node::Lambda { name, body } => self.lambda_section(name, body, stack, f)?,
            }
        }
        Ok(())
    }

    fn section<'v, W: Writer>(
        &self,
        value: Option<&'v Value>,
        kind: SectionKind,
        body: &[Node],
        stack: &mut Vec<&'v Value>,
        f: &mut W,
    ) -> Result<()> {
        match kind {
            SectionKind::Condition => match is_truthy(value) {
                true => self.nodes(body, stack, f),
                false => Ok(()),
            },
            SectionKind::Inverted => match is_truthy(value) {
                true => Ok(()),
                false => self.nodes(body, stack, f),
            },
            SectionKind::Iterate | SectionKind::With | SectionKind::Dynamic => match value {
                Some(Value::Array(items)) => {
                    for item in items {
                        self.scoped(item, body, stack, f)?;
                    }
                    Ok(())
                }
                // a boolean is a test, the current value stays in scope
                Some(Value::Bool(true)) => match stack.last().copied() {
                    Some(current) => self.scoped(current, body, stack, f),
                    None => Ok(()),
                },
                Some(value) if is_truthy(Some(value)) => self.scoped(value, body, stack, f),
                _ => Ok(()),
            },
        }
    }

    fn lambda_section<'v, W: Writer>(
        &self,
        name: &str,
        body: &[Node],
        stack: &mut Vec<&'v Value>,
        f: &mut W,
    ) -> Result<()> {
        let Some(lambda) = self.lambdas.get(name) else {
            return Err(Error::Lambda(name.into()));
        };
        let Some(current) = stack.last().copied() else {
            return Ok(());
        };

        match lambda {
            Lambda::Value(lambda) => self.escaper.escape(&lambda(current), f),
            Lambda::Wrap(lambda) => {
                let mut buffer = String::with_capacity(64);
                self.nodes(body, stack, &mut buffer)?;
                f.write_str(&lambda(current, &buffer))
            }
        }
    }

    fn scoped<'v, W: Writer>(
        &self,
        value: &'v Value,
        body: &[Node],
        stack: &mut Vec<&'v Value>,
        f: &mut W,
    ) -> Result<()> {
        stack.push(value);
        let result = self.nodes(body, stack, f);
        stack.pop();
        result
    }
}

// ===== Lookup =====

/// `false`, `null`, empty array and absent values are falsey.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

fn frame<'v>(stack: &[&'v Value], up: usize) -> Option<&'v Value> {
    let index = stack.len().checked_sub(up + 1)?;
    stack.get(index).copied()
}

fn child<'v>(value: &'v Value, name: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => map.get(name),
        Value::Array(items) => items.get(name.parse::<usize>().ok()?),
        _ => None,
    }
}

fn children<'v>(value: &'v Value, path: &[Box<str>]) -> Option<&'v Value> {
    path.iter().try_fold(value, |value, name| child(value, name))
}

fn lookup_value<'v>(lookup: &Lookup, stack: &[&'v Value]) -> Option<&'v Value> {
    match lookup {
        Lookup::Current { up } => frame(stack, *up),
        Lookup::Frame { up, path } => children(frame(stack, *up)?, path),
        Lookup::Search { up, path } => {
            let (first, rest) = path.split_first()?;
            let start = stack.len().checked_sub(up + 1)?;
            let found = stack[..=start].iter().rev().find_map(|value| child(value, first))?;
            children(found, rest)
        }
        Lookup::Missing => None,
    }
}
