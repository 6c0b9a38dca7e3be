//! `program!` macro
use proc_macro2::TokenStream;
use quote::quote;
use stache_parser::{Compiler, Config, FsLoader, codegen};
use syn::{MetaNameValue, Result, Token, punctuated::Punctuated};

use crate::{
    attribute::{self, Args, Input},
    shared::error,
};

/// parse input -> compile -> codegen
///
/// Templates are loaded relative to the calling crate, every file read is `include_str!`ed so
/// changing it triggers recompilation.
pub fn program(pairs: Punctuated<MetaNameValue, Token![,]>) -> Result<TokenStream> {
    let Args { input, lambdas } = attribute::generate_args(pairs)?;

    // ===== compile =====

    let base = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(base) => base,
        Err(err) => error!("cannot get crate directory: {err}"),
    };
    let conf = Config::default();
    let loader = FsLoader::with_config(base, &conf);
    let compiler = lambdas
        .into_iter()
        .fold(Compiler::new(loader), |compiler, name| compiler.lambda(name))
        .config(conf);

    let result = match &input {
        Input::Path(path) => compiler.compile_path(path),
        Input::Source { source, name } => compiler.compile(source, name),
    };
    let program = match result {
        Ok(program) => program,
        Err(err) => error!("{err}"),
    };

    // ===== codegen =====

    let body = codegen::generate(&program);
    let includes = compiler
        .loader()
        .reads()
        .into_iter()
        .map(|path| path.to_string_lossy().into_owned());

    Ok(quote! {{
        #(const _: &str = include_str!(#includes);)*
        #body
    }})
}
