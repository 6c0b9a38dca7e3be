//! Fragment extraction.
//!
//! A fragment is a named region of a template bounded by two comment anchors:
//!
//! ```text
//! {{! begin:card }}
//! <div>{{title}}</div>
//! {{! end:card }}
//! ```
//!
//! Referenced as `path#card`.
use crate::{Delimiters, Result, TagKind, Token, TokenizeError, whitespace};

/// Extract the text of fragment `name` from `source`.
///
/// Standalone anchor lines belong to neither side. If the delimiters active at the begin anchor
/// are not the default, the result starts with a delimiter tag restoring them.
///
/// Returns `Ok(None)` if either anchor is missing.
pub fn extract(source: &str, name: &str) -> Result<Option<String>> {
    let begin = format!("begin:{name}");
    let end = format!("end:{name}");

    let mut delimiters = Delimiters::default();
    let mut start: Option<(usize, Delimiters)> = None;

    for line in whitespace::lines(source) {
        let line = line?;

        for process in line.tokens() {
            let token = &process.token;
            match &token.token {
                Token::Delimiters(_, next) => delimiters = next.clone(),
                Token::Tag(body, TagKind::Comment) if **body == *begin => {
                    if start.is_some() {
                        return Err(TokenizeError::NestedFragment {
                            position: token.position,
                            name: name.into(),
                        });
                    }
                    let offset = match line.is_standalone() {
                        true => line.end(),
                        false => token.span.end(),
                    };
                    start = Some((offset, delimiters.clone()));
                }
                Token::Tag(body, TagKind::Comment) if **body == *end => {
                    let Some((offset, active)) = start.take() else {
                        continue;
                    };
                    let until = match line.is_standalone() {
                        true => line.start(),
                        false => token.span.start(),
                    };

                    let mut fragment = String::with_capacity(until - offset + 16);
                    if !active.is_default() {
                        fragment.push_str(&format!("{{{{={active}=}}}}"));
                    }
                    fragment.push_str(&source[offset..until]);
                    return Ok(Some(fragment));
                }
                _ => {}
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn standalone_anchors() {
        let src = "{{! begin:x }}\nHELLO\n{{! end:x }}\n";
        assert_eq!(extract(src, "x").unwrap().as_deref(), Some("HELLO\n"));
    }

    #[test]
    fn inline_anchors() {
        let src = "a {{! begin:x }}b {{c}}{{! end:x }} d";
        assert_eq!(extract(src, "x").unwrap().as_deref(), Some("b {{c}}"));
    }

    #[test]
    fn indented_anchors() {
        let src = "<ul>\n  {{! begin:item }}\n  <li>{{.}}</li>\n  {{! end:item }}\n</ul>\n";
        assert_eq!(extract(src, "item").unwrap().as_deref(), Some("  <li>{{.}}</li>\n"));
    }

    #[test]
    fn not_found() {
        let src = "{{! begin:x }}\nHELLO\n{{! end:x }}\n";
        assert_eq!(extract(src, "y").unwrap(), None);
        assert_eq!(extract("{{! begin:y }}\nno end\n", "y").unwrap(), None);
    }

    #[test]
    fn custom_delimiters() {
        let src = "{{=<% %>=}}\n<%! begin:x %>\n<% name %>\n<%! end:x %>\n";
        let fragment = extract(src, "x").unwrap().unwrap();
        assert_eq!(fragment, "{{=<% %>=}}<% name %>\n");
    }

    #[test]
    fn nested() {
        let src = "{{! begin:x }}\n{{! begin:x }}\n{{! end:x }}\n";
        let err = extract(src, "x").unwrap_err();
        assert!(matches!(err, TokenizeError::NestedFragment { .. }));
        assert_eq!(err.position().line, 2);
    }

    #[test]
    fn other_fragments_are_kept() {
        let src = "{{! begin:outer }}\n{{! begin:inner }}\nA\n{{! end:inner }}\n{{! end:outer }}\n";
        assert_eq!(
            extract(src, "outer").unwrap().as_deref(),
            Some("{{! begin:inner }}\nA\n{{! end:inner }}\n")
        );
        assert_eq!(extract(src, "inner").unwrap().as_deref(), Some("A\n"));
    }
}
