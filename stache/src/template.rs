use serde::Serialize;
use stache_core::Program;

use crate::{Renderer, Result, Writer};

/// A model bound to its compiled [`Program`].
///
/// Rendering uses the default [`Renderer`], html escaping and default formatting. Use
/// [`Renderer`] directly for anything else.
///
/// ```
/// use std::sync::LazyLock;
/// use stache::{Program, Template};
///
/// static PAGE: LazyLock<Program> = LazyLock::new(|| {
///     stache::compile("Hello {{name}}!", "page", stache::MemoryLoader::new()).unwrap()
/// });
///
/// #[derive(serde::Serialize)]
/// struct Page {
///     name: String,
/// }
///
/// impl Template for Page {
///     fn program(&self) -> &Program {
///         &PAGE
///     }
/// }
///
/// let page = Page { name: "World".into() };
/// assert_eq!(page.render().unwrap(), "Hello World!");
/// ```
pub trait Template: Serialize {
    fn program(&self) -> &Program;

    fn render_into(&self, f: &mut impl Writer) -> Result<()> {
        let model = serde_json::to_value(self)?;
        Renderer::new().render_into(self.program(), &model, f)
    }

    fn render(&self) -> Result<String> {
        let mut buffer = String::with_capacity(128);
        self.render_into(&mut buffer)?;
        Ok(buffer)
    }
}
