//! The compiler driver.
//!
//! ```custom
//! source -> Tokenizer -> Lines -> File -> Visitor -> Program
//!                                            |
//!                                            +-> partial / parent source -> File -> ..
//! ```
//!
//! Partials and parents are inlined depth first, every reference is resolved against the
//! scope [`Context`] active at the reference site.
use std::collections::{HashMap, HashSet};

use stache_core::{Lookup, Node, Position, Program, SectionKind, fragment};

use crate::{
    ErrorKind, Result,
    ast::Stmt,
    config::{Config, Unresolved},
    context::{Context, Frame, Resolved},
    file::File,
    loader::Loader,
    schema::Schema,
    stack::TemplateStack,
    template::NamedTemplate,
};

/// Block overrides in effect, outer template wins.
type Overrides = HashMap<Box<str>, Vec<Stmt>>;

/// Compile template source into [`Program`] using given [`Loader`] for partials.
pub fn compile(source: &str, name: &str, loader: impl Loader) -> Result<Program> {
    Compiler::new(loader).compile(source, name)
}

/// Template compiler.
///
/// A section named after a registered lambda compiles into [`Node::Lambda`], its body is
/// handed to the lambda at render time.
///
/// ```
/// use stache_parser::{Compiler, MemoryLoader, NamedTemplate};
///
/// let loader = MemoryLoader::new().with("user", "<b>{{name}}</b>");
/// let program = Compiler::new(loader)
///     .partial(NamedTemplate::inline("title", "{{title}}"))
///     .compile("{{>title}}: {{#users}}{{>user}}{{/users}}", "index")
///     .unwrap();
/// assert_eq!(program.name(), "index");
/// ```
pub struct Compiler<L> {
    loader: L,
    config: Config,
    partials: HashMap<Box<str>, NamedTemplate>,
    lambdas: HashSet<Box<str>>,
    schema: Schema,
}

impl<L> Compiler<L>
where
    L: Loader,
{
    /// Create new [`Compiler`] with default [`Config`] and unknown model [`Schema`].
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            config: Config::default(),
            partials: HashMap::new(),
            lambdas: HashSet::new(),
            schema: Schema::Any,
        }
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Register a [`NamedTemplate`], replacing any template with the same name.
    pub fn partial(mut self, templ: NamedTemplate) -> Self {
        self.partials.insert(templ.name().into(), templ);
        self
    }

    /// Register a lambda name.
    pub fn lambda(mut self, name: impl Into<Box<str>>) -> Self {
        self.lambdas.insert(name.into());
        self
    }

    /// Set the model [`Schema`].
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Compile template source named `name`.
    pub fn compile(&self, source: &str, name: &str) -> Result<Program> {
        let mut stack = TemplateStack::new();
        let mut stack = stack.push(name, None)?;

        let mut visitor = Visitor { compiler: self, context: Context::new(self.schema.clone()) };
        let nodes = visitor.visit_template(&mut stack, source, "", &Overrides::new())?;

        let program = Program::new(name, nodes);
        tracing::debug!(name, nodes = program.len(), "compiled template");
        Ok(program)
    }

    /// Load template from path and compile it, the path is used as the template name.
    pub fn compile_path(&self, path: &str) -> Result<Program> {
        let source = self.load_path(path, Position::START, &TemplateStack::new())?;
        self.compile(&source, path)
    }

    /// load `file#fragment` path
    fn load_path(&self, path: &str, position: Position, stack: &TemplateStack) -> Result<String> {
        let (file, fragment) = match path.split_once('#') {
            Some((file, fragment)) => (file, Some(fragment)),
            None => (path, None),
        };

        if file.is_empty() || fragment.is_some_and(str::is_empty) {
            return Err(stack.error(ErrorKind::InvalidReference { name: path.into(), position }));
        }

        let full = self.config.path(file);
        let source = match self.loader.load(&full) {
            Ok(source) => source,
            Err(source) => return Err(stack.error(ErrorKind::Load { path: full.into(), source })),
        };

        let Some(fragment) = fragment else {
            return Ok(source);
        };

        match fragment::extract(&source, fragment) {
            Ok(Some(text)) => Ok(text),
            Ok(None) => Err(stack.error(ErrorKind::FragmentNotFound {
                path: file.into(),
                fragment: fragment.into(),
            })),
            Err(err) => Err(stack.error(err)),
        }
    }
}

// ===== Visitor =====

struct Visitor<'a, L> {
    compiler: &'a Compiler<L>,
    context: Context,
}

impl<L> Visitor<'_, L>
where
    L: Loader,
{
    fn visit_template(
        &mut self,
        stack: &mut TemplateStack,
        source: &str,
        indent: &str,
        overrides: &Overrides,
    ) -> Result<Vec<Node>> {
        let file = File::parse(source, indent).map_err(|err| stack.error(err))?;
        let mut nodes = vec![];
        self.visit_stmts(stack, file.stmts(), overrides, &mut nodes)?;
        Ok(nodes)
    }

    fn visit_stmts(
        &mut self,
        stack: &mut TemplateStack,
        stmts: &[Stmt],
        overrides: &Overrides,
        out: &mut Vec<Node>,
    ) -> Result<()> {
        for stmt in stmts {
            match stmt {
                Stmt::Text(text) => push(out, Node::Text(text.clone())),
                Stmt::Variable { name, escape, position } => {
                    let lookup = self.resolve(stack, name, *position)?.lookup;
                    push(out, Node::Variable { lookup, escape: *escape });
                }
                Stmt::Section { name, inverted: false, body, position }
                    if self.compiler.lambdas.contains(name) =>
                {
                    let mut nodes = vec![];
                    self.visit_enclosed(stack, *position, body, overrides, &mut nodes)?;
                    push(out, Node::Lambda { name: name.clone(), body: nodes });
                }
                Stmt::Section { name, inverted, body, position } => {
                    let node =
                        self.visit_section(stack, name, *inverted, body, *position, overrides)?;
                    push(out, node);
                }
                Stmt::Partial { name, indent, position } => {
                    let nodes = self.include(stack, name, *position, indent, &Overrides::new())?;
                    nodes.into_iter().for_each(|node| push(out, node));
                }
                Stmt::Parent { name, body, position } => {
                    let mut inner = body
                        .iter()
                        .filter_map(|stmt| match stmt {
                            Stmt::Block { name, body, .. } => Some((name.clone(), body.clone())),
                            _ => None,
                        })
                        .collect::<Overrides>();
                    inner.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

                    let nodes = self.include(stack, name, *position, "", &inner)?;
                    nodes.into_iter().for_each(|node| push(out, node));
                }
                Stmt::Block { name, body, position } => match overrides.get(name) {
                    Some(body) => {
                        // an override never resolves to itself
                        let mut inner = overrides.clone();
                        inner.remove(name);
                        self.visit_enclosed(stack, *position, body, &inner, out)?;
                    }
                    None => self.visit_enclosed(stack, *position, body, overrides, out)?,
                },
            }
        }
        Ok(())
    }

    fn visit_section(
        &mut self,
        stack: &mut TemplateStack,
        name: &str,
        inverted: bool,
        body: &[Stmt],
        position: Position,
        overrides: &Overrides,
    ) -> Result<Node> {
        let Resolved { lookup, schema } = self.resolve(stack, name, position)?;

        let (kind, frame) = match schema {
            _ if inverted => (SectionKind::Inverted, Frame::Boolean),
            _ if lookup == Lookup::Missing => (SectionKind::Condition, Frame::Boolean),
            Schema::List(element) => (SectionKind::Iterate, Frame::Section { schema: *element }),
            Schema::Bool => (SectionKind::Condition, Frame::Boolean),
            Schema::Any => (SectionKind::Dynamic, Frame::Section { schema: Schema::Any }),
            schema @ (Schema::Scalar | Schema::Object(_)) => {
                (SectionKind::With, Frame::Section { schema })
            }
        };

        self.enter(stack, position)?;
        self.context.push(frame);
        let mut nodes = vec![];
        let result = self.visit_stmts(stack, body, overrides, &mut nodes);
        self.context.pop();
        result?;

        Ok(Node::Section { lookup, kind, body: nodes })
    }

    /// visit statements behind a boundary that pushes no value
    fn visit_enclosed(
        &mut self,
        stack: &mut TemplateStack,
        position: Position,
        stmts: &[Stmt],
        overrides: &Overrides,
        out: &mut Vec<Node>,
    ) -> Result<()> {
        self.enter(stack, position)?;
        self.context.push(Frame::Enclosed);
        let result = self.visit_stmts(stack, stmts, overrides, out);
        self.context.pop();
        result
    }

    fn include(
        &mut self,
        stack: &mut TemplateStack,
        name: &str,
        position: Position,
        indent: &str,
        overrides: &Overrides,
    ) -> Result<Vec<Node>> {
        let mut stack = stack.push(name, Some(position))?;
        self.enter(&stack, position)?;

        let source = self.load(&stack, name, position)?;
        tracing::debug!(name, depth = stack.len(), "including template");

        self.context.push(Frame::Enclosed);
        let nodes = self.visit_template(&mut stack, &source, indent, overrides);
        self.context.pop();
        nodes
    }

    /// resolution order: registered template, then path
    ///
    /// the entry template is never loaded, it is always on the stack
    fn load(&self, stack: &TemplateStack, name: &str, position: Position) -> Result<String> {
        match self.compiler.partials.get(name) {
            Some(NamedTemplate::Inline { text, .. }) => Ok(text.to_string()),
            Some(NamedTemplate::File { path, .. }) => {
                self.compiler.load_path(path, position, stack)
            }
            None => self.compiler.load_path(name, position, stack),
        }
    }

    fn resolve(&self, stack: &TemplateStack, name: &str, position: Position) -> Result<Resolved> {
        match self.context.resolve(name) {
            Some(resolved) => {
                tracing::trace!(name, lookup = %resolved.lookup, "resolved reference");
                Ok(resolved)
            }
            None => match self.compiler.config.unresolved() {
                Unresolved::Empty => Ok(Resolved { lookup: Lookup::Missing, schema: Schema::Any }),
                Unresolved::Error => Err(stack.error(ErrorKind::UnresolvedReference {
                    name: name.into(),
                    position,
                })),
            },
        }
    }

    /// check depth before pushing a frame
    fn enter(&self, stack: &TemplateStack, position: Position) -> Result<()> {
        let max_depth = self.compiler.config.max_depth();
        match self.context.depth() >= max_depth {
            true => Err(stack.error(ErrorKind::TooDeep { max_depth, position })),
            false => Ok(()),
        }
    }
}

/// push node, merging adjacent texts
fn push(nodes: &mut Vec<Node>, node: Node) {
    if let (Some(Node::Text(prev)), Node::Text(text)) = (nodes.last_mut(), &node) {
        let mut merged = String::with_capacity(prev.len() + text.len());
        merged.push_str(prev);
        merged.push_str(text);
        *prev = merged.into_boxed_str();
        return;
    }
    nodes.push(node);
}
