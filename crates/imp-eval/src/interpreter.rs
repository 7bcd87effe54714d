//! Interpreter — program registration and the two public entry points.

use crate::error::{EvalError, EvalResult};
use crate::evaluator::Evaluator;
use imp_types::ast::{Expression, Int, Program, TopLevel};

/// Default step budget.
const DEFAULT_STEP_BUDGET: u64 = 1_000_000;
/// Default call depth limit.
const DEFAULT_MAX_DEPTH: usize = 1_000;

/// Runtime instance of an Imp interpreter.
///
/// Owns the persistent top-level scope, the function table, and the
/// captured print output. One instance evaluates any number of single
/// expressions (`interpret`) or whole programs (`call_main`);
/// top-level bindings persist across calls.
pub struct Interpreter {
    eval: Evaluator,
}

impl Interpreter {
    /// Create an interpreter with the default resource limits.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_STEP_BUDGET, DEFAULT_MAX_DEPTH)
    }

    /// Create with a custom step budget and call depth limit.
    pub fn with_limits(step_budget: u64, max_depth: usize) -> Self {
        Self {
            eval: Evaluator::new(step_budget, max_depth),
        }
    }

    /// Evaluate a single expression against the persistent top-level
    /// scope. Bindings created here are visible to later calls.
    pub fn interpret(&mut self, expression: &Expression) -> EvalResult<Int> {
        self.eval.eval(expression)
    }

    /// Run a whole program and return the value of `main`.
    ///
    /// Two passes over the definitions, in declaration order: every
    /// function registers first, then globals initialize, so a global
    /// initializer may call a function defined after it. The body of
    /// `main` then evaluates directly in the top-level scope, with no
    /// extra frame between it and the globals.
    pub fn call_main(&mut self, program: &Program) -> EvalResult<Int> {
        for definition in &program.definitions {
            if let TopLevel::Function(function) = definition {
                // Last definition of a duplicated name wins.
                self.eval
                    .functions
                    .insert(function.name.clone(), function.clone());
            }
        }
        for definition in &program.definitions {
            if let TopLevel::GlobalVariable { name, expression } = definition {
                let value = self.eval.eval(expression)?;
                self.eval.env.define(name, value);
            }
        }

        let main = self
            .eval
            .functions
            .get("main")
            .cloned()
            .ok_or(EvalError::MissingEntryPoint)?;
        self.eval.eval(&main.body)
    }

    /// Read a top-level binding.
    pub fn global(&self, name: &str) -> Option<Int> {
        self.eval.env.global(name)
    }

    /// Captured println output, in evaluation order.
    pub fn output(&self) -> &[Int] {
        &self.eval.printed
    }

    /// Clear captured output.
    pub fn clear_output(&mut self) {
        self.eval.printed.clear();
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
