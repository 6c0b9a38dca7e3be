//! Lower a [`Program`] into rust tokens.
//!
//! Generated code is an expression constructing the program through the `stache` crate, used
//! by the `program!` macro to compile templates at build time.
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use stache_core::{Lookup, Node, Program, SectionKind};

/// `ToTokens` for public name
struct Stache;

impl ToTokens for Stache {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        quote! {::stache}.to_tokens(tokens);
    }
}

/// Generate an expression constructing `program`.
pub fn generate(program: &Program) -> TokenStream {
    let name = program.name();
    let nodes = program.nodes().iter().map(node);
    quote! {
        #Stache::Program::new(#name, ::std::vec![#(#nodes),*])
    }
}

fn node(node_: &Node) -> TokenStream {
    match node_ {
        Node::Text(text) => {
            let text = &**text;
            quote! { #Stache::Node::Text(::std::convert::From::from(#text)) }
        }
        Node::Variable { lookup: lookup_, escape } => {
            let lookup_ = lookup(lookup_);
            quote! { #Stache::Node::Variable { lookup: #lookup_, escape: #escape } }
        }
        Node::Section { lookup: lookup_, kind: kind_, body } => {
            let lookup_ = lookup(lookup_);
            let kind_ = kind(*kind_);
            let body = body.iter().map(node);
            quote! {
                #Stache::Node::Section {
                    lookup: #lookup_,
                    kind: #kind_,
                    body: ::std::vec![#(#body),*],
                }
            }
        }
        Node::Lambda { name, body } => {
            let name = &**name;
            let body = body.iter().map(node);
            quote! {
                #Stache::Node::Lambda {
                    name: ::std::convert::From::from(#name),
                    body: ::std::vec![#(#body),*],
                }
            }
        }
    }
}

fn lookup(lookup: &Lookup) -> TokenStream {
    fn path(path: &[Box<str>]) -> TokenStream {
        let path = path.iter().map(|e| &**e);
        quote! { ::std::vec![#(::std::convert::From::from(#path)),*] }
    }

    match lookup {
        Lookup::Current { up } => quote! { #Stache::Lookup::Current { up: #up } },
        Lookup::Frame { up, path: p } => {
            let p = path(p);
            quote! { #Stache::Lookup::Frame { up: #up, path: #p } }
        }
        Lookup::Search { up, path: p } => {
            let p = path(p);
            quote! { #Stache::Lookup::Search { up: #up, path: #p } }
        }
        Lookup::Missing => quote! { #Stache::Lookup::Missing },
    }
}

fn kind(kind: SectionKind) -> TokenStream {
    let variant = match kind {
        SectionKind::Iterate => format_ident!("Iterate"),
        SectionKind::With => format_ident!("With"),
        SectionKind::Condition => format_ident!("Condition"),
        SectionKind::Inverted => format_ident!("Inverted"),
        SectionKind::Dynamic => format_ident!("Dynamic"),
    };
    quote! { #Stache::SectionKind::#variant }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn generate_program() {
        let program = Program::new("t", vec![
            Node::Text("Hi ".into()),
            Node::Section {
                lookup: Lookup::Search { up: 0, path: vec!["users".into()] },
                kind: SectionKind::Dynamic,
                body: vec![Node::Variable { lookup: Lookup::Current { up: 0 }, escape: false }],
            },
        ]);

        let expected = quote! {
            ::stache::Program::new("t", ::std::vec![
                ::stache::Node::Text(::std::convert::From::from("Hi ")),
                ::stache::Node::Section {
                    lookup: ::stache::Lookup::Search {
                        up: 0usize,
                        path: ::std::vec![::std::convert::From::from("users")]
                    },
                    kind: ::stache::SectionKind::Dynamic,
                    body: ::std::vec![::stache::Node::Variable {
                        lookup: ::stache::Lookup::Current { up: 0usize },
                        escape: false
                    }],
                }
            ])
        };
        assert_eq!(generate(&program).to_string(), expected.to_string());
    }
}
