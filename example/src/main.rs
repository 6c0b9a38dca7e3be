use std::{
    io::{BufRead, stdin},
    sync::LazyLock,
};

use serde::Serialize;
use stache::{Compiler, FsLoader, Program, Renderer, Template};
use tracing_subscriber::EnvFilter;

static PAGE: LazyLock<Program> = LazyLock::new(|| stache::program!(path = "page.mustache"));

#[derive(Serialize)]
struct Page {
    id: i32,
    name: String,
    tags: Vec<String>,
}

impl Template for Page {
    fn program(&self) -> &Program {
        &PAGE
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let page = Page {
        id: 4,
        name: "<script>alert('foo')</script>".into(),
        tags: vec!["rust".into(), "mustache".into()],
    };

    let inline = stache::program!(source = "<div>Inlined {{name}}</div>\n", name = "inline");

    loop {
        // build time program
        let result = page.render().unwrap();
        let inlined = Renderer::new().render_model(&inline, &page).unwrap();
        println!("{result}{inlined}");

        // runtime program, picks up template edits
        let compiler = Compiler::new(FsLoader::new(env!("CARGO_MANIFEST_DIR")));
        match compiler.compile_path("page.mustache") {
            Ok(program) => {
                tracing::info!(nodes = program.len(), "recompiled `{}`", program.name());
                println!("{}", Renderer::new().render_model(&program, &page).unwrap());
            }
            Err(err) => tracing::error!("{err}"),
        }

        println!("[Press ENTER to re render]");

        let mut buf = String::new();
        { stdin().lock().read_line(&mut buf).unwrap(); }

        if buf == "q\n" {
            break
        }
    }
}
