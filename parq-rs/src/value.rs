//! Runtime value type for resolved template parameters.
//!
//! Every expression embedded in a template resolves to one of these; the
//! parameterizer hands them back in occurrence order so the caller can bind
//! them positionally. Arithmetic and comparison are checked rather than
//! coercing: mixing incompatible types is an evaluation error, not a `0`.

use std::cmp::Ordering;
use std::fmt;

/// A resolved parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => {
                // Keep a trailing ".0" so integral floats stay visibly floats.
                if x.fract() == 0.0 && x.abs() < 1e15 {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

// Operand pair for binary arithmetic: pure-integer operations stay in i64.
enum NumPair {
    Ints(i64, i64),
    Floats(f64, f64),
}

impl Value {
    /// Truthiness: `null`, `false`, `0`, `0.0`, `""`, and `[]` are falsy.
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
        }
    }

    /// Name of the type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Classify a binary operation's operands. Int⊕Int stays in i64 so
    /// values above 2^53 are never rounded through f64; a `Float` on either
    /// side promotes both to f64.
    fn numeric(a: &Value, b: &Value, op: &str) -> Result<NumPair, String> {
        match (a, b) {
            (Value::Int(x), Value::Int(y)) => Ok(NumPair::Ints(*x, *y)),
            _ => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => Ok(NumPair::Floats(x, y)),
                _ => Err(format!(
                    "cannot apply '{op}' to {} and {}",
                    a.type_name(),
                    b.type_name()
                )),
            },
        }
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// `+`: numeric addition, or concatenation when either side is a string.
    pub fn arith_add(&self, rhs: &Value) -> Result<Value, String> {
        if let (Value::Str(_), _) | (_, Value::Str(_)) = (self, rhs) {
            return Ok(Value::Str(format!("{self}{rhs}")));
        }
        match Self::numeric(self, rhs, "+")? {
            NumPair::Ints(a, b) => a
                .checked_add(b)
                .map(Value::Int)
                .ok_or_else(|| "integer overflow in '+'".into()),
            NumPair::Floats(a, b) => Ok(Value::Float(a + b)),
        }
    }

    pub fn arith_sub(&self, rhs: &Value) -> Result<Value, String> {
        match Self::numeric(self, rhs, "-")? {
            NumPair::Ints(a, b) => a
                .checked_sub(b)
                .map(Value::Int)
                .ok_or_else(|| "integer overflow in '-'".into()),
            NumPair::Floats(a, b) => Ok(Value::Float(a - b)),
        }
    }

    pub fn arith_mul(&self, rhs: &Value) -> Result<Value, String> {
        match Self::numeric(self, rhs, "*")? {
            NumPair::Ints(a, b) => a
                .checked_mul(b)
                .map(Value::Int)
                .ok_or_else(|| "integer overflow in '*'".into()),
            NumPair::Floats(a, b) => Ok(Value::Float(a * b)),
        }
    }

    pub fn arith_div(&self, rhs: &Value) -> Result<Value, String> {
        match Self::numeric(self, rhs, "/")? {
            NumPair::Ints(_, 0) => Err("division by zero".into()),
            NumPair::Ints(a, b) => a
                .checked_div(b)
                .map(Value::Int)
                .ok_or_else(|| "integer overflow in '/'".into()),
            NumPair::Floats(a, b) => {
                if b == 0.0 {
                    return Err("division by zero".into());
                }
                Ok(Value::Float(a / b))
            }
        }
    }

    pub fn arith_rem(&self, rhs: &Value) -> Result<Value, String> {
        match Self::numeric(self, rhs, "%")? {
            NumPair::Ints(_, 0) => Err("modulo by zero".into()),
            NumPair::Ints(a, b) => a
                .checked_rem(b)
                .map(Value::Int)
                .ok_or_else(|| "integer overflow in '%'".into()),
            NumPair::Floats(a, b) => {
                if b == 0.0 {
                    return Err("modulo by zero".into());
                }
                Ok(Value::Float(a % b))
            }
        }
    }

    pub fn arith_neg(&self) -> Result<Value, String> {
        match self {
            Value::Int(n) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| "integer overflow in negation".into()),
            Value::Float(x) => Ok(Value::Float(-x)),
            other => Err(format!("cannot negate {}", other.type_name())),
        }
    }

    // ── Comparison ────────────────────────────────────────────────────────────

    /// Equality with numeric cross-type comparison (`1 == 1.0` holds).
    /// Int/Int pairs compare exactly, without an f64 round-trip.
    pub fn eq_value(&self, rhs: &Value) -> bool {
        if let (Value::Int(a), Value::Int(b)) = (self, rhs) {
            return a == b;
        }
        match (self.as_number(), rhs.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self == rhs,
        }
    }

    /// Ordering for `<`, `<=`, `>`, `>=`. Defined for numeric pairs and
    /// string pairs only.
    pub fn cmp_value(&self, rhs: &Value) -> Result<Ordering, String> {
        if let (Value::Int(a), Value::Int(b)) = (self, rhs) {
            return Ok(a.cmp(b));
        }
        if let (Some(a), Some(b)) = (self.as_number(), rhs.as_number()) {
            return Ok(a.partial_cmp(&b).unwrap_or(Ordering::Equal));
        }
        if let (Value::Str(a), Value::Str(b)) = (self, rhs) {
            return Ok(a.cmp(b));
        }
        Err(format!(
            "cannot compare {} to {}",
            self.type_name(),
            rhs.type_name()
        ))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
