//! Shared types for the Imp interpreter.
//!
//! This crate defines the AST node types, the operator table, and the
//! builder functions front-ends use to assemble programs. Everything
//! here is pure data: evaluation lives in `imp-eval`.

pub mod ast;

pub use ast::{Expression, FunctionDefinition, Int, Operator, Program, TopLevel};
