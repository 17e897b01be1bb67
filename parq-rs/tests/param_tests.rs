//! End-to-end parameterizer tests: templates in, `(query, values)` out.
//!
//! Each scenario exercises the public API the way a caller preparing a
//! statement would, covering segment ordering, placeholder counting,
//! evaluation order, side effects, isolation, and reentrancy.

use std::cell::Cell;
use std::rc::Rc;

use parq::{
    parameterize, parameterize_exprs, parameterize_exprs_with, parameterize_with, Error, Scope,
    Value,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn scope(bindings: &[(&str, Value)]) -> Scope {
    let mut s = Scope::new();
    for (name, value) in bindings {
        s.set(*name, value.clone());
    }
    s
}

// ── Direct resolver ───────────────────────────────────────────────────────────

#[test]
fn template_without_expressions_is_returned_unchanged() {
    let (sql, values) = parameterize("SELECT * FROM users", &Scope::new()).unwrap();
    assert_eq!(sql, "SELECT * FROM users");
    assert_eq!(values, vec![]);
}

#[test]
fn empty_template() {
    let (sql, values) = parameterize("", &Scope::new()).unwrap();
    assert_eq!(sql, "");
    assert_eq!(values, vec![]);
}

#[test]
fn values_come_back_in_occurrence_order() {
    let s = scope(&[("a", Value::Int(1)), ("b", Value::Int(2))]);
    let (sql, values) = parameterize("{a}-{b}", &s).unwrap();
    assert_eq!(sql, "?-?");
    assert_eq!(values, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn placeholder_count_matches_value_count() {
    let s = scope(&[
        ("a", Value::Int(1)),
        ("b", Value::Str("x".into())),
        ("c", Value::Bool(true)),
    ]);
    let (sql, values) = parameterize("{a} {b} {c}", &s).unwrap();
    assert_eq!(sql.matches('?').count(), 3);
    assert_eq!(values.len(), 3);
}

#[test]
fn literal_question_mark_is_not_a_parameter() {
    let s = scope(&[("x", Value::Int(1))]);
    let (sql, values) = parameterize("text with literal ? and {x}", &s).unwrap();
    assert_eq!(sql, "text with literal ? and ?");
    assert_eq!(values, vec![Value::Int(1)]);
}

#[test]
fn direct_undefined_name() {
    let err = parameterize("{undefined_name}", &Scope::new()).unwrap_err();
    assert_eq!(
        err,
        Error::UnresolvedReference {
            name: "undefined_name".into()
        }
    );
}

#[test]
fn direct_rejects_operators_and_calls() {
    let s = scope(&[("x", Value::Int(1))]);
    assert!(matches!(
        parameterize("{x + 1}", &s),
        Err(Error::UnsupportedExpression { .. })
    ));
    assert!(matches!(
        parameterize("{f(x)}", &s),
        Err(Error::UnsupportedExpression { .. })
    ));
}

#[test]
fn malformed_template_fails_for_both_resolvers() {
    assert!(matches!(
        parameterize("{unclosed", &Scope::new()),
        Err(Error::TemplateSyntax { .. })
    ));
    assert!(matches!(
        parameterize_exprs("{unclosed", &Scope::new()),
        Err(Error::TemplateSyntax { .. })
    ));
}

#[test]
fn custom_placeholder_token() {
    let s = scope(&[("id", Value::Int(9))]);
    let (sql, values) = parameterize_with("id = {id}", &s, "%s").unwrap();
    assert_eq!(sql, "id = %s");
    assert_eq!(values, vec![Value::Int(9)]);
}

#[test]
fn escaped_braces_stay_literal() {
    let s = scope(&[("x", Value::Int(1))]);
    let (sql, values) = parameterize("json: {{\"k\": {x}}}", &s).unwrap();
    assert_eq!(sql, "json: {\"k\": ?}");
    assert_eq!(values, vec![Value::Int(1)]);
}

// ── Evaluating resolver ───────────────────────────────────────────────────────

#[test]
fn arithmetic_expression() {
    let s = scope(&[("x", Value::Int(5))]);
    let (sql, values) = parameterize_exprs("{x+1}", &s).unwrap();
    assert_eq!(sql, "?");
    assert_eq!(values, vec![Value::Int(6)]);
}

#[test]
fn duplicate_expressions_evaluated_independently() {
    let s = scope(&[("x", Value::Int(1)), ("y", Value::Int(2))]);
    let (sql, values) = parameterize_exprs("{x+1}, {y+2}, {x+1}", &s).unwrap();
    assert_eq!(sql, "?, ?, ?");
    assert_eq!(values, vec![Value::Int(2), Value::Int(4), Value::Int(2)]);
}

#[test]
fn function_calls_run_left_to_right_once_each() {
    let counter = Rc::new(Cell::new(0i64));
    let c = Rc::clone(&counter);
    let mut s = Scope::new();
    s.set("x", 1);
    s.register_fn("f", move |_args| {
        c.set(c.get() + 1);
        Ok(Value::Int(c.get()))
    });

    let (sql, values) = parameterize_exprs("{f(x)}, {f(x)}", &s).unwrap();
    assert_eq!(sql, "?, ?");
    // First call's increment is visible before the second call runs.
    assert_eq!(values, vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(counter.get(), 2);
}

#[test]
fn assignment_side_effect_flows_forward_within_one_call() {
    let s = scope(&[("x", Value::Int(1))]);
    let (_, values) = parameterize_exprs("{x = x + 10}, {x}", &s).unwrap();
    assert_eq!(values, vec![Value::Int(11), Value::Int(11)]);
    // ...but never back into the caller's scope.
    assert_eq!(s.get("x"), Some(&Value::Int(1)));
}

#[test]
fn evaluating_undefined_name_fails() {
    let err = parameterize_exprs("{undefined_name}", &Scope::new()).unwrap_err();
    match err {
        Error::Evaluation { index, src, message } => {
            assert_eq!(index, 0);
            assert_eq!(src, "undefined_name");
            assert!(message.contains("undefined_name"));
        }
        other => panic!("expected Evaluation error, got {other:?}"),
    }
}

#[test]
fn evaluation_failure_reports_segment_position() {
    let s = scope(&[("x", Value::Int(1))]);
    let err = parameterize_exprs("{x}, {x}, {1 / 0}", &s).unwrap_err();
    match err {
        Error::Evaluation { index, src, message } => {
            assert_eq!(index, 2);
            assert_eq!(src, "1 / 0");
            assert!(message.contains("division by zero"));
        }
        other => panic!("expected Evaluation error, got {other:?}"),
    }
}

#[test]
fn large_i64_binds_exactly() {
    // 2^53 + 1 is unrepresentable in f64; the bound value must not round.
    let s = scope(&[("id", Value::Int(9_007_199_254_740_993))]);
    let (sql, values) = parameterize_exprs("{id + 0}", &s).unwrap();
    assert_eq!(sql, "?");
    assert_eq!(values, vec![Value::Int(9_007_199_254_740_993)]);
}

#[test]
fn int_overflow_fails_instead_of_wrapping_or_panicking() {
    let s = scope(&[("x", Value::Int(i64::MIN))]);
    let err = parameterize_exprs("{-x}", &s).unwrap_err();
    match err {
        Error::Evaluation { index, src, message } => {
            assert_eq!(index, 0);
            assert_eq!(src, "-x");
            assert!(message.contains("overflow"));
        }
        other => panic!("expected Evaluation error, got {other:?}"),
    }

    let s = scope(&[("x", Value::Int(i64::MAX))]);
    assert!(matches!(
        parameterize_exprs("{x + 1}", &s),
        Err(Error::Evaluation { .. })
    ));
}

#[test]
fn overflowing_literal_is_a_syntax_error_not_zero() {
    // Expression parsing happens at split time, so an out-of-range literal
    // surfaces as a template syntax error for both resolvers.
    assert!(matches!(
        parameterize_exprs("{99999999999999999999}", &Scope::new()),
        Err(Error::TemplateSyntax { .. })
    ));
    assert!(matches!(
        parameterize("{99999999999999999999}", &Scope::new()),
        Err(Error::TemplateSyntax { .. })
    ));
}

#[test]
fn mixed_value_types() {
    let s = scope(&[
        ("name", Value::Str("ada".into())),
        ("age", Value::Int(36)),
        ("active", Value::Bool(true)),
    ]);
    let (sql, values) =
        parameterize_exprs("INSERT INTO u VALUES ({name}, {age + 1}, {active})", &s).unwrap();
    assert_eq!(sql, "INSERT INTO u VALUES (?, ?, ?)");
    assert_eq!(
        values,
        vec![
            Value::Str("ada".into()),
            Value::Int(37),
            Value::Bool(true)
        ]
    );
}

#[test]
fn index_access_into_list() {
    let s = scope(&[(
        "ids",
        Value::List(vec![Value::Int(10), Value::Int(20), Value::Int(30)]),
    )]);
    let (sql, values) = parameterize_exprs("IN ({ids[0]}, {ids[-1]})", &s).unwrap();
    assert_eq!(sql, "IN (?, ?)");
    assert_eq!(values, vec![Value::Int(10), Value::Int(30)]);
}

#[test]
fn ternary_and_comparison() {
    let s = scope(&[("n", Value::Int(3))]);
    let (_, values) = parameterize_exprs("{n > 2 ? \"big\" : \"small\"}", &s).unwrap();
    assert_eq!(values, vec![Value::Str("big".into())]);
}

#[test]
fn quoted_brace_inside_expression() {
    let mut s = Scope::new();
    s.register_fn("wrap", |args| Ok(Value::Str(format!("<{}>", args[0]))));
    let (sql, values) = parameterize_exprs("{wrap(\"}\")}", &s).unwrap();
    assert_eq!(sql, "?");
    assert_eq!(values, vec![Value::Str("<}>".into())]);
}

#[test]
fn postgres_style_placeholder() {
    let s = scope(&[("a", Value::Int(1))]);
    let (sql, _) = parameterize_exprs_with("v = {a * 2}", &s, "$1").unwrap();
    assert_eq!(sql, "v = $1");
}

// ── Scope capture and reentrancy ──────────────────────────────────────────────

#[test]
fn overlay_locals_shadow_globals() {
    let mut globals = Scope::new();
    globals.set("a", 1);
    globals.set("b", 2);
    let mut locals = Scope::new();
    locals.set("b", 20);

    let captured = globals.overlay(&locals);
    let (_, values) = parameterize("{a} {b}", &captured).unwrap();
    assert_eq!(values, vec![Value::Int(1), Value::Int(20)]);
}

#[test]
fn reentrant_parameterization_from_inside_an_expression() {
    // A registered function that itself runs the evaluating parameterizer on
    // an unrelated template. Neither call may corrupt the other.
    let mut inner_scope = Scope::new();
    inner_scope.set("y", 100);

    let mut s = Scope::new();
    s.set("x", 1);
    s.register_fn("nested", move |_| {
        let (sql, values) = parameterize_exprs("{y + 1}", &inner_scope)
            .map_err(|e| e.to_string())?;
        assert_eq!(sql, "?");
        Ok(values.into_iter().next().unwrap())
    });

    let (sql, values) = parameterize_exprs("{nested()}, {x}", &s).unwrap();
    assert_eq!(sql, "?, ?");
    assert_eq!(values, vec![Value::Int(101), Value::Int(1)]);
    assert_eq!(s.get("x"), Some(&Value::Int(1)));
}

#[test]
fn concurrent_calls_from_independent_scopes() {
    // Each thread builds its own scope; calls touch only their own snapshots.
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let mut s = Scope::new();
                s.set("n", i as i64);
                let (sql, values) = parameterize_exprs("{n * 10}", &s).unwrap();
                assert_eq!(sql, "?");
                assert_eq!(values, vec![Value::Int(i as i64 * 10)]);
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}
