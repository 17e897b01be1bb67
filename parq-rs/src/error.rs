//! Error taxonomy for template parameterization.
//!
//! Every failure is surfaced synchronously at the point it is detected; a
//! failed call never returns a partial value list.

use std::fmt;

/// Error returned by the template splitter and the two resolvers.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed interpolation or expression syntax in the template text.
    TemplateSyntax { message: String },

    /// Direct resolver: bare identifier not present in the scope.
    UnresolvedReference { name: String },

    /// Direct resolver: segment is not a bare identifier.
    UnsupportedExpression { src: String },

    /// Evaluating resolver: an expression failed during evaluation.
    /// `index` is the zero-based expression-segment position, `src` its
    /// source text.
    Evaluation {
        index: usize,
        src: String,
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TemplateSyntax { message } => {
                write!(f, "template syntax error: {message}")
            }
            Error::UnresolvedReference { name } => {
                write!(f, "unresolved reference: '{name}' is not in scope")
            }
            Error::UnsupportedExpression { src } => {
                write!(
                    f,
                    "unsupported expression '{src}': the direct resolver accepts bare variable names only"
                )
            }
            Error::Evaluation {
                index,
                src,
                message,
            } => {
                write!(f, "evaluation of segment {index} ('{src}') failed: {message}")
            }
        }
    }
}

impl std::error::Error for Error {}

// ── Tests ─────────────────────────────────────────────────────────────────────
