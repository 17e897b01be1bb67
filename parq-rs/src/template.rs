//! Template splitting.
//!
//! Splits an interpolation-style template into literal and expression
//! segments:
//!
//! | Sequence    | Meaning                                          |
//! |-------------|--------------------------------------------------|
//! | `{expr}`    | Embedded expression, becomes one bound parameter |
//! | `{{`        | Literal `{`                                      |
//! | `}}`        | Literal `}`                                      |
//!
//! Brace balance is tracked through nested braces and through quoted string
//! literals inside expressions, so `{a["}"]}` splits as one expression.
//! Each expression source is parsed eagerly; a malformed expression is a
//! template syntax error at split time, before anything is evaluated.

use crate::error::Error;
use crate::expr::{self, Expr};

/// One expression segment: its source text and parsed form.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprSegment {
    pub src: String,
    pub ast: Expr,
}

/// A literal-text or expression unit of a template, in occurrence order.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Expr(ExprSegment),
}

/// Split `template` into an ordered segment sequence.
pub fn split(template: &str) -> Result<Vec<Segment>, Error> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    literal.push('{');
                    continue;
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                let src = read_expr_src(&mut chars)?;
                if src.trim().is_empty() {
                    return Err(Error::TemplateSyntax {
                        message: "empty expression '{}'".into(),
                    });
                }
                let ast = expr::parse_expr(&src).map_err(|e| Error::TemplateSyntax {
                    message: format!("in '{{{src}}}': {e}"),
                })?;
                segments.push(Segment::Expr(ExprSegment { src, ast }));
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    literal.push('}');
                } else {
                    return Err(Error::TemplateSyntax {
                        message: "single '}' outside an expression (use '}}' for a literal)".into(),
                    });
                }
            }
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// Read an expression's source up to (and consuming) the matching `}`.
///
/// Tracks nested `{...}` depth and skips over quoted string literals so
/// braces inside strings never close the segment.
fn read_expr_src(chars: &mut std::iter::Peekable<std::str::Chars>) -> Result<String, Error> {
    let mut src = String::new();
    let mut depth = 0i32;
    loop {
        match chars.next() {
            Some('}') => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                src.push('}');
            }
            Some('{') => {
                depth += 1;
                src.push('{');
            }
            Some(q @ ('"' | '\'')) => {
                src.push(q);
                read_quoted(chars, q, &mut src)?;
            }
            Some(c) => src.push(c),
            None => {
                return Err(Error::TemplateSyntax {
                    message: "unclosed '{'".into(),
                })
            }
        }
    }
    Ok(src)
}

/// Copy a quoted string literal (with backslash escapes) into `src`,
/// including the closing quote.
fn read_quoted(
    chars: &mut std::iter::Peekable<std::str::Chars>,
    quote: char,
    src: &mut String,
) -> Result<(), Error> {
    loop {
        match chars.next() {
            Some('\\') => {
                src.push('\\');
                match chars.next() {
                    Some(c) => src.push(c),
                    None => {
                        return Err(Error::TemplateSyntax {
                            message: "unterminated string in expression".into(),
                        })
                    }
                }
            }
            Some(c) if c == quote => {
                src.push(c);
                return Ok(());
            }
            Some(c) => src.push(c),
            None => {
                return Err(Error::TemplateSyntax {
                    message: "unterminated string in expression".into(),
                })
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.into())
    }

    fn expr_srcs(segments: &[Segment]) -> Vec<&str> {
        segments
            .iter()
            .filter_map(|s| match s {
                Segment::Expr(e) => Some(e.src.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    #[test]
    fn no_expressions() {
        let segs = split("SELECT * FROM t").unwrap();
        assert_eq!(segs, vec![lit("SELECT * FROM t")]);
    }

    #[test]
    fn empty_template() {
        assert_eq!(split("").unwrap(), vec![]);
    }

    #[test]
    fn single_expression() {
        let segs = split("WHERE id = {user_id}").unwrap();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0], lit("WHERE id = "));
        assert_eq!(expr_srcs(&segs), vec!["user_id"]);
    }

    #[test]
    fn expression_order_is_occurrence_order() {
        let segs = split("{a}-{b}").unwrap();
        assert_eq!(expr_srcs(&segs), vec!["a", "b"]);
    }

    #[test]
    fn adjacent_expressions() {
        let segs = split("{a}{b}").unwrap();
        assert_eq!(segs.len(), 2);
        assert_eq!(expr_srcs(&segs), vec!["a", "b"]);
    }

    #[test]
    fn escaped_braces() {
        let segs = split("a {{not expr}} b").unwrap();
        assert_eq!(segs, vec![lit("a {not expr} b")]);
    }

    #[test]
    fn escaped_braces_next_to_expression() {
        let segs = split("{{{x}}}").unwrap();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0], lit("{"));
        assert_eq!(expr_srcs(&segs), vec!["x"]);
        assert_eq!(segs[2], lit("}"));
    }

    #[test]
    fn brace_inside_string_literal() {
        let segs = split("{a[\"}\"]}").unwrap();
        assert_eq!(expr_srcs(&segs), vec!["a[\"}\"]"]);
    }

    #[test]
    fn escaped_quote_inside_string_literal() {
        let segs = split(r#"{f("a\"}b")}"#).unwrap();
        assert_eq!(expr_srcs(&segs), vec![r#"f("a\"}b")"#]);
    }

    #[test]
    fn unclosed_brace() {
        let err = split("{unclosed").unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax { .. }));
    }

    #[test]
    fn lone_close_brace() {
        let err = split("a } b").unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax { .. }));
    }

    #[test]
    fn empty_expression() {
        let err = split("a {} b").unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax { .. }));
    }

    #[test]
    fn malformed_expression() {
        let err = split("{1 +}").unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax { .. }));
    }

    #[test]
    fn format_spec_suffix_rejected() {
        // Binding is positional; format specifiers have no meaning here.
        assert!(split("{x:>10}").is_err());
    }

    #[test]
    fn duplicate_expressions_kept_separately() {
        let segs = split("{x+1}, {x+1}").unwrap();
        assert_eq!(expr_srcs(&segs), vec!["x+1", "x+1"]);
    }

    #[test]
    fn error_names_the_bad_expression() {
        let err = split("literal {1 +} more").unwrap_err();
        assert!(err.to_string().contains("1 +"));
    }
}
