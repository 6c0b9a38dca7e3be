use syn::{punctuated::Punctuated, *};

use crate::shared::error;

/// Template given to the macro.
pub enum Input {
    /// `path = ".."`, resolved by the loader.
    Path(Box<str>),
    /// `source = ".."` with optional `name = ".."`.
    Source { source: Box<str>, name: Box<str> },
}

/// Parsed macro arguments.
pub struct Args {
    pub input: Input,
    /// Section names compiled as lambdas.
    pub lambdas: Vec<Box<str>>,
}

const INLINE_NAME: &str = "inline";

/// Macro arguments
///
/// Accept input:
///
/// - path: `path = ".." | source = ".."`
/// - name: `name = ".."`, only with `source`
/// - lambdas: `lambdas = "a, b"`
pub fn generate_args(pairs: Punctuated<MetaNameValue, Token![,]>) -> Result<Args> {
    let mut visitor = Visitor::default();

    for MetaNameValue { path, value, .. } in pairs {
        visitor.visit_pair(path.require_ident()?.clone(), value)?;
    }

    let lambdas = visitor
        .lambdas
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(Into::into)
        .collect();

    let input = match visitor {
        Visitor { path: Some(path), source: None, name: None, .. } => Input::Path(path),
        Visitor { path: None, source: Some(source), name, .. } => Input::Source {
            source,
            name: name.unwrap_or_else(|| INLINE_NAME.into()),
        },
        Visitor { path: Some(_), name: Some(_), .. } => {
            error!("`name` is only allowed with `source`")
        }
        _ => error!("only single either of `path` or `source` is required"),
    };

    Ok(Args { input, lambdas })
}

// ===== Visitor =====

#[derive(Default)]
struct Visitor {
    path: Option<Box<str>>,
    source: Option<Box<str>>,
    name: Option<Box<str>>,
    lambdas: Option<Box<str>>,
}

impl Visitor {
    fn visit_pair(&mut self, name: Ident, value: Expr) -> Result<()> {
        let slot = match () {
            _ if name.eq("path") => &mut self.path,
            _ if name.eq("source") => &mut self.source,
            _ if name.eq("name") => &mut self.name,
            _ if name.eq("lambdas") => &mut self.lambdas,
            _ => error!(name, "no such key"),
        };

        match slot.replace(str_value(&value)?.into_boxed_str()) {
            Some(_) => error!(name, "duplicate `{name}` key"),
            None => Ok(()),
        }
    }
}

// ===== Util =====

fn str_value(value: &Expr) -> Result<String> {
    match value {
        Expr::Lit(ExprLit { lit: Lit::Str(lit), .. }) => Ok(lit.value()),
        _ => error!("expected string"),
    }
}
