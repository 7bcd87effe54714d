//! Runtime error types for the Imp evaluator.

use imp_types::Operator;
use thiserror::Error;

/// Evaluation error. Every variant is terminal for the current
/// evaluation: the walker aborts at the failure point and the
/// front-end decides how to present it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Divisor evaluated to zero under `/`.
    #[error("division by zero")]
    DivisionByZero,
    /// Checked arithmetic left the `Int` range (includes `MIN / -1`).
    #[error("arithmetic overflow applying '{0}'")]
    ArithmeticOverflow(Operator),
    /// Name not bound in any frame of the active scope chain.
    #[error("undefined variable: {0}")]
    UnboundIdentifier(String),
    /// Call target not present in the function table.
    #[error("unknown function: {0}")]
    UnknownFunction(String),
    /// Argument count differs from the parameter list.
    #[error("function '{name}' expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    /// No `main` function registered when `call_main` ran.
    #[error("main function is not defined")]
    MissingEntryPoint,
    /// Call depth limit exceeded.
    #[error("call depth limit exceeded")]
    StackExhausted,
    /// Step budget exceeded.
    #[error("step budget exhausted")]
    BudgetExhausted,
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
