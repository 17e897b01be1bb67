//! Placeholder rendering.
//!
//! Pure text assembly: literal segments pass through verbatim, each
//! expression segment is replaced by the placeholder token. A `?` that
//! appears in literal text stays literal; only expression positions are
//! ever counted as bound parameters.

use crate::template::Segment;

/// Render `segments` into the parameterized string.
pub fn render(segments: &[Segment], placeholder: &str) -> String {
    let mut out = String::new();
    for seg in segments {
        match seg {
            Segment::Literal(text) => out.push_str(text),
            Segment::Expr(_) => out.push_str(placeholder),
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
