//! parq — interpolated-template query parameterizer.
//!
//! Turns an interpolation-style template into a placeholder-bearing query
//! string plus an ordered value list for a positional prepared-statement
//! API:
//!
//! - Template splitting (`{expr}`, `{{`/`}}` brace escapes)
//! - A constrained expression language: arithmetic, comparisons, logical
//!   operators, ternary, assignment, function calls, index access
//! - Two resolvers: direct (bare variable lookup) and evaluating (full
//!   expressions against a per-call scope snapshot)
//!
//! # Quick start
//!
//! ```rust
//! use parq::{parameterize, parameterize_exprs, Scope, Value};
//!
//! let mut scope = Scope::new();
//! scope.set("id", 7);
//!
//! let (sql, values) = parameterize("SELECT * FROM t WHERE id = {id}", &scope).unwrap();
//! assert_eq!(sql, "SELECT * FROM t WHERE id = ?");
//! assert_eq!(values, vec![Value::Int(7)]);
//!
//! let (sql, values) = parameterize_exprs("WHERE id = {id * 2}", &scope).unwrap();
//! assert_eq!(sql, "WHERE id = ?");
//! assert_eq!(values, vec![Value::Int(14)]);
//! ```

pub mod error;
pub mod expr;
pub mod param;
pub mod render;
pub mod scope;
pub mod template;
pub mod value;

// Re-exports for convenience.
pub use error::Error;
pub use param::{
    parameterize, parameterize_exprs, parameterize_exprs_with, parameterize_with,
    DEFAULT_PLACEHOLDER,
};
pub use render::render;
pub use scope::Scope;
pub use template::{split, ExprSegment, Segment};
pub use value::Value;
