//! Explicit variable scope passed to the parameterizer.
//!
//! The caller builds a [`Scope`] with the bindings it wants visible to
//! template expressions, instead of the parameterizer inspecting the calling
//! frame. Each parameterization call clones the scope into a private
//! snapshot, so assignments made while evaluating expressions are visible to
//! later expressions in the same template but never to the caller's scope.
//!
//! Native functions are registered as `Rc<dyn Fn>` and shared by reference
//! between a scope and its snapshots: a function is the deliberate channel
//! through which expression evaluation may touch outside state.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::expr::EvalContext;
use crate::value::Value;

/// A native function callable from template expressions.
pub type NativeFn = Rc<dyn Fn(Vec<Value>) -> Result<Value, String>>;

/// Variable bindings and native functions visible to template expressions.
#[derive(Clone, Default)]
pub struct Scope {
    vars: HashMap<String, Value>,
    fns: HashMap<String, NativeFn>,
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fn_names: Vec<&str> = self.fns.keys().map(String::as_str).collect();
        fn_names.sort_unstable();
        f.debug_struct("Scope")
            .field("vars", &self.vars)
            .field("fns", &fn_names)
            .finish()
    }
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind (or rebind) a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Get the value of a variable.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Remove a binding. Returns `true` if it existed.
    pub fn unset(&mut self, name: &str) -> bool {
        self.vars.remove(name).is_some()
    }

    /// Returns `true` if the variable is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Register a native function callable from expressions as `name(...)`.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(Vec<Value>) -> Result<Value, String> + 'static,
    {
        self.fns.insert(name.into(), Rc::new(f));
    }

    /// Merge `locals` over this scope: bindings and functions in `locals`
    /// shadow same-named entries here. This is the capture step for callers
    /// that keep separate global and local scopes.
    pub fn overlay(&self, locals: &Scope) -> Scope {
        let mut merged = self.clone();
        for (name, value) in &locals.vars {
            merged.vars.insert(name.clone(), value.clone());
        }
        for (name, f) in &locals.fns {
            merged.fns.insert(name.clone(), Rc::clone(f));
        }
        merged
    }

    /// Iterate over all variable bindings.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.vars.iter()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EvalContext for Scope {
    fn get_var(&self, name: &str) -> Option<Value> {
        self.vars.get(name).cloned()
    }

    fn set_var(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_owned(), value);
    }

    fn call_fn(&mut self, name: &str, args: Vec<Value>) -> Result<Value, String> {
        let f = self
            .fns
            .get(name)
            .cloned()
            .ok_or_else(|| format!("unknown function '{name}'"))?;
        f(args)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
