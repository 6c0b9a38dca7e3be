use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;
use stache::{
    Compiler, Config, ErrorKind, MemoryLoader, Program, Renderer, Schema, Template, Unresolved,
    Value, compile,
};

fn render(source: &str, model: Value) -> String {
    render_with(MemoryLoader::new(), source, model)
}

fn render_with(loader: MemoryLoader, source: &str, model: Value) -> String {
    let program = compile(source, "root", loader).unwrap();
    Renderer::new().render(&program, &model).unwrap()
}

#[test]
fn idempotent() {
    let loader = MemoryLoader::new().with("row", "<li>{{name}}</li>\n");
    let compiler = Compiler::new(loader);
    let source = "<ul>\n  {{#rows}}\n  {{>row}}\n  {{/rows}}\n</ul>\n";
    let model = json!({ "rows": [{ "name": "a" }, { "name": "b" }] });

    let renderer = Renderer::new();
    let first = renderer.render(&compiler.compile(source, "list").unwrap(), &model).unwrap();
    let second = renderer.render(&compiler.compile(source, "list").unwrap(), &model).unwrap();

    assert_eq!(first, "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n");
    assert_eq!(first, second);
}

#[test]
fn delimiters() {
    let model = json!({ "x": "1" });
    assert_eq!(render("{{=<% %>=}}<% x %>", model.clone()), render("{{x}}", model.clone()));
    assert_eq!(render("{{=| |=}}|x| |={{ }}=|{{x}}", model), "1 1");
}

#[test]
fn standalone_lines() {
    assert_eq!(render("  {{#a}}\n  x\n  {{/a}}\n", json!({ "a": true })), "  x\n");
    assert_eq!(render("  {{! note }}\nx\n", json!({})), "x\n");
    assert_eq!(render("  {{v}}\n", json!({ "v": 1 })), "  1\n");
}

#[test]
fn escaping() {
    let model = json!({ "v": "<a href='x'>&</a>" });
    assert_eq!(render("{{v}}", model.clone()), "&lt;a href=&#x27;x&#x27;&gt;&amp;&lt;/a&gt;");
    assert_eq!(render("{{{v}}}", model.clone()), "<a href='x'>&</a>");
    assert_eq!(render("{{&v}}", model), "<a href='x'>&</a>");
}

#[test]
fn context_fallback() {
    let source = "{{#a}}{{#b}}{{c}}{{/b}}{{/a}}";
    assert_eq!(render(source, json!({ "c": "root", "a": { "b": {} } })), "root");
    assert_eq!(render(source, json!({ "c": "root", "a": { "c": "a", "b": {} } })), "a");
    assert_eq!(render(source, json!({ "c": "root", "a": { "c": "a", "b": { "c": "b" } } })), "b");
}

#[test]
fn context_fallback_with_schema() {
    let source = "{{#a}}{{#b}}{{c}}{{/b}}{{/a}}";
    let model = json!({ "c": "root", "a": { "b": {} } });
    let program = Compiler::new(MemoryLoader::new())
        .schema(Schema::infer(&model))
        .compile(source, "root")
        .unwrap();
    assert_eq!(Renderer::new().render(&program, &model).unwrap(), "root");
}

#[test]
fn dotted_names() {
    let model = json!({ "a": { "b": { "c": "x" } }, "c": "root" });
    assert_eq!(render("{{a.b.c}}", model.clone()), "x");
    assert_eq!(render("{{#a}}{{b.c}}{{/a}}", model.clone()), "x");
    // only the first segment walks outward
    assert_eq!(render("{{#a}}{{b.d}}{{/a}}", model), "");
}

#[test]
fn section_truthiness() {
    let list = "{{#list}}{{.}}{{/list}}";
    let inverted = "{{^list}}empty{{/list}}";

    assert_eq!(render(list, json!({ "list": [1, 2, 3] })), "123");
    assert_eq!(render(list, json!({ "list": [] })), "");
    assert_eq!(render(list, json!({ "list": false })), "");
    assert_eq!(render(list, json!({ "list": null })), "");
    assert_eq!(render(list, json!({})), "");
    assert_eq!(render(inverted, json!({ "list": [] })), "empty");
    assert_eq!(render(inverted, json!({ "list": [1] })), "");
    assert_eq!(render(inverted, json!({})), "empty");
}

#[test]
fn section_truthiness_with_schema() {
    let source = "{{#list}}{{.}}{{/list}}{{^list}}empty{{/list}}{{#flag}}!{{/flag}}";
    let model = json!({ "list": [1, 2, 3], "flag": true });
    let program = Compiler::new(MemoryLoader::new())
        .schema(Schema::infer(&model))
        .compile(source, "root")
        .unwrap();

    let renderer = Renderer::new();
    assert_eq!(renderer.render(&program, &model).unwrap(), "123!");
    assert_eq!(renderer.render(&program, &json!({ "list": [], "flag": false })).unwrap(), "empty");
}

#[test]
fn unresolved_empty() {
    let program = Compiler::new(MemoryLoader::new())
        .config(Config::default().with_unresolved(Unresolved::Empty))
        .schema(Schema::object([("name", Schema::Scalar)]))
        .compile("{{name}}{{nope}}{{#nope}}x{{/nope}}{{^nope}}y{{/nope}}", "root")
        .unwrap();
    assert_eq!(Renderer::new().render(&program, &json!({ "name": "n" })).unwrap(), "ny");
}

#[test]
fn circular_partial() {
    let loader = MemoryLoader::from([("a", "{{>b}}"), ("b", "{{>a}}")]);
    let err = compile("{{>a}}", "root", loader).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CircularTemplate { .. }));
    assert_eq!(err.chain(), "root -> a -> b -> a");

    let err = stache::Error::from(err).into_io();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn fragment() {
    let loader = MemoryLoader::from([("f", "{{! begin:x }}\nHELLO\n{{! end:x }}\n")]);
    assert_eq!(render_with(loader.clone(), "{{>f#x}}", json!({})), "HELLO\n");

    let err = compile("{{>f#y}}", "root", loader).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::FragmentNotFound { .. }));
}

#[test]
fn partial_indentation() {
    let loader = MemoryLoader::from([("p", "a\nb\n"), ("q", "  {{>p}}\n")]);
    assert_eq!(render_with(loader.clone(), "  {{>p}}\n", json!({})), "  a\n  b\n");
    assert_eq!(render_with(loader.clone(), "  {{>q}}\n", json!({})), "    a\n    b\n");
    assert_eq!(render_with(loader, "x {{>p}}|", json!({})), "x a\nb\n|");
}

#[test]
fn parent_blocks() {
    let loader = MemoryLoader::from([("layout", "<h1>{{$title}}Default{{/title}}</h1>\n")]);
    let source = "{{<layout}}{{$title}}Hi {{name}}{{/title}}{{/layout}}";
    let output = render_with(loader.clone(), source, json!({ "name": "World" }));
    assert_eq!(output, "<h1>Hi World</h1>\n");
    assert_eq!(render_with(loader, "{{<layout}}{{/layout}}", json!({})), "<h1>Default</h1>\n");
}

#[test]
fn writers() {
    let program = compile("{{#n}}{{.}}{{/n}}", "root", MemoryLoader::new()).unwrap();
    let model = json!({ "n": [1, 2] });

    let mut bytes = bytes::BytesMut::new();
    Renderer::new().render_into(&program, &model, &mut bytes).unwrap();
    assert_eq!(&bytes[..], b"12");

    let mut io = stache::IoWriter(Vec::new());
    Renderer::new().render_into(&program, &model, &mut io).unwrap();
    assert_eq!(io.0, b"12");
}

#[derive(Serialize)]
struct User {
    name: String,
    roles: Vec<&'static str>,
}

impl Template for User {
    fn program(&self) -> &Program {
        static PROGRAM: std::sync::LazyLock<Program> = std::sync::LazyLock::new(|| {
            compile("{{name}}:{{#roles}} {{.}}{{/roles}}", "user", MemoryLoader::new()).unwrap()
        });
        &PROGRAM
    }
}

#[test]
fn template() {
    let user = User { name: "<root>".into(), roles: vec!["admin", "dev"] };
    assert_eq!(user.render().unwrap(), "&lt;root&gt;: admin dev");

    let raw = Renderer::new()
        .escaper(stache::NoEscape)
        .render_model(user.program(), &user)
        .unwrap();
    assert_eq!(raw, "<root>: admin dev");
}

fn render_typed(source: &str, model: Value) -> String {
    let program = Compiler::new(MemoryLoader::new())
        .schema(Schema::infer(&model))
        .compile(source, "root")
        .unwrap();
    Renderer::new().render(&program, &model).unwrap()
}

#[test]
fn typed_matches_untyped() {
    let mixed = json!({ "b": "root", "list": [{ "a": 1 }, { "b": "elem" }] });
    let cases = [
        ("{{#flag}}{{.}}{{/flag}}", json!({ "flag": true, "n": 1 })),
        ("{{#flag}}{{n}}{{/flag}}", json!({ "flag": true, "n": 1 })),
        ("{{#list}}[{{b}}]{{/list}}", mixed.clone()),
    ];
    for (source, model) in cases {
        assert_eq!(render(source, model.clone()), render_typed(source, model), "{source}");
    }
    assert_eq!(render_typed("{{#list}}[{{b}}]{{/list}}", mixed), "[root][elem]");
}

#[test]
fn lambdas() {
    let program = Compiler::new(MemoryLoader::new())
        .lambda("prefix")
        .lambda("suffix")
        .compile("{{#prefix}}{{/prefix}}, {{#suffix}}{{name}}{{/suffix}}", "root")
        .unwrap();
    let renderer = Renderer::new()
        .lambda("prefix", |value: &Value| {
            format!("Sir {}", value["name"].as_str().unwrap_or_default())
        })
        .wrap_lambda("suffix", |_: &Value, body: &str| format!("{body} Esquire"));

    let output = renderer.render(&program, &json!({ "name": "Chris" })).unwrap();
    assert_eq!(output, "Sir Chris, Chris Esquire");

    let err = Renderer::new().render(&program, &json!({})).unwrap_err();
    assert!(matches!(err, stache::Error::Lambda(_)));
}
