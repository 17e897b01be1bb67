//! Parameterizer entry points.
//!
//! Composes the splitter, a resolver, and the placeholder renderer into the
//! public API. Two resolver strategies:
//!
//! - *direct* ([`parameterize`]): each `{...}` must be a bare variable name,
//!   resolved by lookup. Anything else is rejected.
//! - *evaluating* ([`parameterize_exprs`]): each `{...}` is a full
//!   expression evaluated left-to-right against a private clone of the
//!   caller's scope. Assignments and function-call side effects are visible
//!   to later expressions in the same template, never to the caller's scope.

use crate::error::Error;
use crate::expr::{self, Expr};
use crate::render::render;
use crate::scope::Scope;
use crate::template::{split, Segment};
use crate::value::Value;

/// Default placeholder token.
pub const DEFAULT_PLACEHOLDER: &str = "?";

/// Parameterize `template` with the direct resolver and `?` placeholders.
///
/// Every expression segment must be a bare variable name bound in `scope`.
pub fn parameterize(template: &str, scope: &Scope) -> Result<(String, Vec<Value>), Error> {
    parameterize_with(template, scope, DEFAULT_PLACEHOLDER)
}

/// [`parameterize`] with a caller-chosen placeholder token.
pub fn parameterize_with(
    template: &str,
    scope: &Scope,
    placeholder: &str,
) -> Result<(String, Vec<Value>), Error> {
    let segments = split(template)?;
    let mut values = Vec::new();
    for seg in &segments {
        if let Segment::Expr(e) = seg {
            match &e.ast {
                Expr::Var(name) => {
                    let v = scope.get(name).cloned().ok_or_else(|| {
                        Error::UnresolvedReference { name: name.clone() }
                    })?;
                    values.push(v);
                }
                _ => {
                    return Err(Error::UnsupportedExpression { src: e.src.clone() });
                }
            }
        }
    }
    Ok((render(&segments, placeholder), values))
}

/// Parameterize `template` with the evaluating resolver and `?` placeholders.
///
/// Expressions are evaluated strictly left-to-right, each occurrence exactly
/// once, against a snapshot cloned from `scope`.
pub fn parameterize_exprs(template: &str, scope: &Scope) -> Result<(String, Vec<Value>), Error> {
    parameterize_exprs_with(template, scope, DEFAULT_PLACEHOLDER)
}

/// [`parameterize_exprs`] with a caller-chosen placeholder token.
pub fn parameterize_exprs_with(
    template: &str,
    scope: &Scope,
    placeholder: &str,
) -> Result<(String, Vec<Value>), Error> {
    let segments = split(template)?;

    // Per-call snapshot: expression side effects land here, not in `scope`.
    let mut snapshot = scope.clone();

    let mut values = Vec::new();
    let mut index = 0usize;
    for seg in &segments {
        if let Segment::Expr(e) = seg {
            let v = expr::eval_expr(&e.ast, &mut snapshot).map_err(|message| {
                Error::Evaluation {
                    index,
                    src: e.src.clone(),
                    message,
                }
            })?;
            values.push(v);
            index += 1;
        }
    }
    Ok((render(&segments, placeholder), values))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
