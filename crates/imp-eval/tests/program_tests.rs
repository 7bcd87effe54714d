//! Whole-program tests for the Interpreter driver.
//!
//! Tests key driver features:
//! - function registration and entry point dispatch
//! - global initialization order and the two-pass registration
//! - the dynamic scope chain (globals, caller locals, parameter
//!   shadowing)
//! - recursion, arity, and resource limit failures
//! - JSON-delivered programs

use imp_eval::{EvalError, Interpreter};
use imp_types::ast::*;

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

/// Run a program on a fresh interpreter and return `main`'s value.
fn run(program: &Program) -> Int {
    let mut interp = Interpreter::new();
    interp.call_main(program).expect("program failed")
}

/// Run a program on a fresh interpreter, expecting failure.
fn run_err(program: &Program) -> EvalError {
    let mut interp = Interpreter::new();
    interp
        .call_main(program)
        .expect_err("program unexpectedly succeeded")
}

/// `fact(n) = if n < 2 { 1 } else { n * fact(n - 1) }`
fn fact_definition() -> TopLevel {
    function(
        "fact",
        &["n"],
        if_else(
            less_than(identifier("n"), integer(2)),
            integer(1),
            multiply(
                identifier("n"),
                call("fact", vec![subtract(identifier("n"), integer(1))]),
            ),
        ),
    )
}

// ══════════════════════════════════════════════════════════════════════════════
// Canonical programs
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn factorial_of_five_is_120() {
    let program = program(vec![
        function("main", &[], call("fact", vec![integer(5)])),
        fact_definition(),
    ]);
    assert_eq!(run(&program), 120);
}

#[test]
fn while_sum_of_one_to_ten() {
    let body = block(vec![
        assignment("i", integer(1)),
        assignment("total", integer(0)),
        while_expr(
            less_or_equal(identifier("i"), integer(10)),
            block(vec![
                assignment("total", add(identifier("total"), identifier("i"))),
                assignment("i", add(identifier("i"), integer(1))),
            ]),
        ),
        identifier("total"),
    ]);
    let program = program(vec![function("main", &[], body)]);
    assert_eq!(run(&program), 55);
}

#[test]
fn println_program_captures_result() {
    let program = program(vec![
        function("main", &[], println(call("fact", vec![integer(5)]))),
        fact_definition(),
    ]);
    let mut interp = Interpreter::new();
    assert_eq!(interp.call_main(&program).unwrap(), 120);
    assert_eq!(interp.output(), &[120]);
}

// ══════════════════════════════════════════════════════════════════════════════
// Globals & registration order
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn globals_initialize_in_declaration_order() {
    let program = program(vec![
        global("x", integer(10)),
        global("y", add(identifier("x"), integer(5))),
        function("main", &[], identifier("y")),
    ]);
    let mut interp = Interpreter::new();
    assert_eq!(interp.call_main(&program).unwrap(), 15);
    assert_eq!(interp.global("x"), Some(10));
    assert_eq!(interp.global("y"), Some(15));
}

#[test]
fn functions_register_before_globals_initialize() {
    // The global initializer calls a function defined after it.
    let program = program(vec![
        global("z", call("answer", vec![])),
        function("answer", &[], integer(42)),
        function("main", &[], identifier("z")),
    ]);
    assert_eq!(run(&program), 42);
}

#[test]
fn duplicate_function_definitions_last_wins() {
    let program = program(vec![
        function("f", &[], integer(1)),
        function("f", &[], integer(2)),
        function("main", &[], call("f", vec![])),
    ]);
    assert_eq!(run(&program), 2);
}

#[test]
fn main_body_runs_in_the_top_level_scope() {
    // An assignment in main lands in the global frame, not a child
    // frame of it.
    let program = program(vec![function(
        "main",
        &[],
        block(vec![assignment("x", integer(5)), integer(0)]),
    )]);
    let mut interp = Interpreter::new();
    interp.call_main(&program).unwrap();
    assert_eq!(interp.global("x"), Some(5));
}

// ══════════════════════════════════════════════════════════════════════════════
// Scope chain
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn globals_are_visible_inside_called_functions() {
    let program = program(vec![
        global("x", integer(10)),
        function("f", &[], identifier("x")),
        function("main", &[], call("f", vec![])),
    ]);
    assert_eq!(run(&program), 10);
}

#[test]
fn assignment_in_function_updates_the_global() {
    let program = program(vec![
        global("count", integer(0)),
        function(
            "bump",
            &[],
            assignment("count", add(identifier("count"), integer(1))),
        ),
        function(
            "main",
            &[],
            block(vec![
                call("bump", vec![]),
                call("bump", vec![]),
                identifier("count"),
            ]),
        ),
    ]);
    let mut interp = Interpreter::new();
    assert_eq!(interp.call_main(&program).unwrap(), 2);
    assert_eq!(interp.global("count"), Some(2));
}

#[test]
fn caller_locals_are_visible_in_the_callee() {
    // Dynamic scoping: inner reads the parameter of whoever called it.
    let program = program(vec![
        function("inner", &[], identifier("a")),
        function("outer", &["a"], call("inner", vec![])),
        function("main", &[], call("outer", vec![integer(7)])),
    ]);
    assert_eq!(run(&program), 7);
}

#[test]
fn callee_locals_do_not_leak_into_the_caller() {
    let program = program(vec![
        function(
            "f",
            &[],
            block(vec![assignment("t", integer(99)), integer(0)]),
        ),
        function(
            "main",
            &[],
            block(vec![call("f", vec![]), identifier("t")]),
        ),
    ]);
    assert_eq!(run_err(&program), EvalError::UnboundIdentifier("t".to_string()));
}

#[test]
fn parameters_shadow_globals() {
    let program = program(vec![
        global("n", integer(1)),
        function("f", &["n"], identifier("n")),
        function("main", &[], call("f", vec![integer(5)])),
    ]);
    let mut interp = Interpreter::new();
    assert_eq!(interp.call_main(&program).unwrap(), 5);
    assert_eq!(interp.global("n"), Some(1));
}

#[test]
fn assignment_to_a_parameter_stays_local() {
    // The parameter binding is the nearest frame holding `n`, so the
    // assignment never reaches the global.
    let program = program(vec![
        global("n", integer(1)),
        function(
            "f",
            &["n"],
            block(vec![
                assignment("n", add(identifier("n"), integer(1))),
                identifier("n"),
            ]),
        ),
        function("main", &[], call("f", vec![integer(5)])),
    ]);
    let mut interp = Interpreter::new();
    assert_eq!(interp.call_main(&program).unwrap(), 6);
    assert_eq!(interp.global("n"), Some(1));
}

// ══════════════════════════════════════════════════════════════════════════════
// Failures
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn unknown_function_fails() {
    let program = program(vec![function("main", &[], call("missing", vec![]))]);
    assert_eq!(
        run_err(&program),
        EvalError::UnknownFunction("missing".to_string())
    );
}

#[test]
fn program_without_main_fails() {
    let program = program(vec![function("helper", &[], integer(1))]);
    assert_eq!(run_err(&program), EvalError::MissingEntryPoint);
}

#[test]
fn arity_mismatch_fails() {
    let program = program(vec![
        function("f", &["a", "b"], add(identifier("a"), identifier("b"))),
        function("main", &[], call("f", vec![integer(1)])),
    ]);
    assert_eq!(
        run_err(&program),
        EvalError::ArityMismatch {
            name: "f".to_string(),
            expected: 2,
            actual: 1,
        }
    );
}

#[test]
fn unbounded_recursion_hits_the_depth_limit() {
    let program = program(vec![
        function("spin", &[], call("spin", vec![])),
        function("main", &[], call("spin", vec![])),
    ]);
    let mut interp = Interpreter::with_limits(1_000_000, 32);
    assert_eq!(
        interp.call_main(&program).unwrap_err(),
        EvalError::StackExhausted
    );
}

#[test]
fn bounded_recursion_fits_under_the_default_limit() {
    let program = program(vec![
        function("main", &[], call("fact", vec![integer(20)])),
        fact_definition(),
    ]);
    assert_eq!(run(&program), 2_432_902_008_176_640_000);
}

// ══════════════════════════════════════════════════════════════════════════════
// Programs as data
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn json_delivered_program_runs() {
    let source = r#"
    {
      "definitions": [
        {
          "Function": {
            "name": "main",
            "params": [],
            "body": { "Call": { "name": "double", "args": [{ "IntegerLiteral": 21 }] } }
          }
        },
        {
          "Function": {
            "name": "double",
            "params": ["x"],
            "body": {
              "Binary": {
                "operator": "multiply",
                "lhs": { "Identifier": "x" },
                "rhs": { "IntegerLiteral": 2 }
              }
            }
          }
        }
      ]
    }"#;
    let parsed: Program = serde_json::from_str(source).expect("invalid program JSON");
    assert_eq!(run(&parsed), 42);
}
