//! macros for `stache` template
mod shared;
mod attribute;
mod program;

/// Compile a template at build time into a `stache::Program` expression.
///
/// ```ignore
/// let index = stache::program!(path = "index.html");
/// let inline = stache::program!(source = "Hello {{name}}", name = "hello");
/// let lambdas = stache::program!(source = "{{#upper}}{{name}}{{/upper}}", lambdas = "upper");
/// ```
///
/// Paths are resolved from the `templates` directory of the calling crate, `/path` from the
/// crate root.
#[proc_macro]
pub fn program(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    type Pairs = syn::punctuated::Punctuated<syn::MetaNameValue, syn::Token![,]>;
    let pairs = syn::parse_macro_input!(input with Pairs::parse_terminated);
    match program::program(pairs) {
        Ok(ok) => ok.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
