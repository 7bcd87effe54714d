//! AST node types for the Imp language.
//!
//! Trees are assembled bottom-up through the builder functions at the
//! end of this module and are never mutated after construction.
//! Recursive children are boxed to keep enum sizes reasonable.
//! There is no source text and no spans: front-ends construct these
//! nodes directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The language's single numeric type. Pins the width policy in one
/// place: all arithmetic is 64-bit and checked.
pub type Int = i64;

// ══════════════════════════════════════════════════════════════════════════════
// Operators
// ══════════════════════════════════════════════════════════════════════════════

/// Binary operator symbols. Comparisons yield `1` or `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    EqualEqual,
    NotEqual,
}

impl Operator {
    /// The surface symbol, used in error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::EqualEqual => "==",
            Self::NotEqual => "!=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An expression node. Every construct in the language is an
/// expression and evaluates to an [`Int`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    IntegerLiteral(Int),
    Identifier(String),
    Binary {
        operator: Operator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    /// `name = expression`; the expression's value is also the result.
    Assignment {
        name: String,
        expression: Box<Expression>,
    },
    /// An ordered sequence; yields the last element's value, or `0`
    /// when empty.
    Block(Vec<Expression>),
    If {
        condition: Box<Expression>,
        then_clause: Box<Expression>,
        else_clause: Option<Box<Expression>>,
    },
    While {
        condition: Box<Expression>,
        body: Box<Expression>,
    },
    Call {
        name: String,
        args: Vec<Expression>,
    },
    /// Evaluates its argument, records it on the output capture, and
    /// yields the argument's value.
    Println(Box<Expression>),
}

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A named function. Parameters bind positionally at call time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub params: Vec<String>,
    pub body: Expression,
}

/// A top-level definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TopLevel {
    Function(FunctionDefinition),
    /// Initialized in declaration order before `main` runs.
    GlobalVariable { name: String, expression: Expression },
}

/// A complete Imp program: an ordered sequence of top-level
/// definitions, one of which must be a function named `main`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub definitions: Vec<TopLevel>,
}

// ══════════════════════════════════════════════════════════════════════════════
// Builders
// ══════════════════════════════════════════════════════════════════════════════

// Construction only. Malformed trees (empty identifier names, calls to
// nothing) are accepted here and surface as evaluation failures.

pub fn integer(value: Int) -> Expression {
    Expression::IntegerLiteral(value)
}

pub fn identifier(name: impl Into<String>) -> Expression {
    Expression::Identifier(name.into())
}

pub fn binary(operator: Operator, lhs: Expression, rhs: Expression) -> Expression {
    Expression::Binary {
        operator,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

pub fn add(lhs: Expression, rhs: Expression) -> Expression {
    binary(Operator::Add, lhs, rhs)
}

pub fn subtract(lhs: Expression, rhs: Expression) -> Expression {
    binary(Operator::Subtract, lhs, rhs)
}

pub fn multiply(lhs: Expression, rhs: Expression) -> Expression {
    binary(Operator::Multiply, lhs, rhs)
}

pub fn divide(lhs: Expression, rhs: Expression) -> Expression {
    binary(Operator::Divide, lhs, rhs)
}

pub fn less_than(lhs: Expression, rhs: Expression) -> Expression {
    binary(Operator::LessThan, lhs, rhs)
}

pub fn less_or_equal(lhs: Expression, rhs: Expression) -> Expression {
    binary(Operator::LessOrEqual, lhs, rhs)
}

pub fn greater_than(lhs: Expression, rhs: Expression) -> Expression {
    binary(Operator::GreaterThan, lhs, rhs)
}

pub fn greater_or_equal(lhs: Expression, rhs: Expression) -> Expression {
    binary(Operator::GreaterOrEqual, lhs, rhs)
}

pub fn equal(lhs: Expression, rhs: Expression) -> Expression {
    binary(Operator::EqualEqual, lhs, rhs)
}

pub fn not_equal(lhs: Expression, rhs: Expression) -> Expression {
    binary(Operator::NotEqual, lhs, rhs)
}

pub fn assignment(name: impl Into<String>, expression: Expression) -> Expression {
    Expression::Assignment {
        name: name.into(),
        expression: Box::new(expression),
    }
}

pub fn block(elements: Vec<Expression>) -> Expression {
    Expression::Block(elements)
}

/// An `if` with no else clause; yields `1` when the condition fails.
pub fn if_expr(condition: Expression, then_clause: Expression) -> Expression {
    Expression::If {
        condition: Box::new(condition),
        then_clause: Box::new(then_clause),
        else_clause: None,
    }
}

pub fn if_else(
    condition: Expression,
    then_clause: Expression,
    else_clause: Expression,
) -> Expression {
    Expression::If {
        condition: Box::new(condition),
        then_clause: Box::new(then_clause),
        else_clause: Some(Box::new(else_clause)),
    }
}

pub fn while_expr(condition: Expression, body: Expression) -> Expression {
    Expression::While {
        condition: Box::new(condition),
        body: Box::new(body),
    }
}

pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Expression {
    Expression::Call {
        name: name.into(),
        args,
    }
}

pub fn println(arg: Expression) -> Expression {
    Expression::Println(Box::new(arg))
}

pub fn function(name: impl Into<String>, params: &[&str], body: Expression) -> TopLevel {
    TopLevel::Function(FunctionDefinition {
        name: name.into(),
        params: params.iter().map(|p| (*p).to_string()).collect(),
        body,
    })
}

pub fn global(name: impl Into<String>, expression: Expression) -> TopLevel {
    TopLevel::GlobalVariable {
        name: name.into(),
        expression,
    }
}

pub fn program(definitions: Vec<TopLevel>) -> Program {
    Program { definitions }
}
