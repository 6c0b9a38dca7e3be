#![cfg(feature = "macros")]
use pretty_assertions::assert_eq;
use serde_json::json;
use stache::{Program, Renderer};

#[test]
fn file() {
    let program: Program = stache::program!(path = "/tests/templates/page.mustache");
    let model = json!({
        "items": [{ "name": "a" }, { "name": "<b>" }],
        "year": 2025,
    });

    assert_eq!(
        Renderer::new().render(&program, &model).unwrap(),
        "<ul>\n  <li>a</li>\n  <li>&lt;b&gt;</li>\n</ul>\n<footer>2025</footer>\n"
    );
}

#[test]
fn inline() {
    let program = stache::program!(source = "Hello {{name}}!", name = "hello");
    assert_eq!(program.name(), "hello");
    let output = Renderer::new().render(&program, &json!({ "name": "World" })).unwrap();
    assert_eq!(output, "Hello World!");
}

#[test]
fn same_as_runtime() {
    let source = "{{#a}}{{#b}}{{c}}{{/b}}{{/a}}";
    let runtime = stache::compile(source, "inline", stache::MemoryLoader::new()).unwrap();
    let build = stache::program!(source = "{{#a}}{{#b}}{{c}}{{/b}}{{/a}}");
    assert_eq!(runtime, build);
}

#[test]
fn lambdas() {
    let program = stache::program!(source = "{{#upper}}{{name}}{{/upper}}", lambdas = "upper");
    let renderer = Renderer::new()
        .wrap_lambda("upper", |_: &serde_json::Value, body: &str| body.to_uppercase());
    let output = renderer.render(&program, &json!({ "name": "World" })).unwrap();
    assert_eq!(output, "WORLD");
}
