//! Core expression evaluator.

use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use imp_types::ast::{Expression, FunctionDefinition, Int, Operator};
use std::collections::BTreeMap;

/// The core evaluator — walks expression nodes and produces integers.
pub struct Evaluator {
    /// Variable environment (scoped).
    pub env: Environment,
    /// Function table. Populated by the driver before `main` runs,
    /// read-only thereafter.
    pub functions: BTreeMap<String, FunctionDefinition>,
    /// Captured println output, in evaluation order.
    pub printed: Vec<Int>,
    /// Steps consumed so far.
    steps: u64,
    /// Step budget. Bounds total node evaluations so divergent loops
    /// fail instead of hanging the host.
    step_budget: u64,
    /// Active call depth.
    depth: usize,
    /// Call depth limit. Bounds recursion before the host stack does.
    max_depth: usize,
}

impl Evaluator {
    /// Create a new evaluator with the given resource limits.
    pub fn new(step_budget: u64, max_depth: usize) -> Self {
        Self {
            env: Environment::new(),
            functions: BTreeMap::new(),
            printed: Vec::new(),
            steps: 0,
            step_budget,
            depth: 0,
            max_depth,
        }
    }

    /// Consume one step. Fails once the budget is spent.
    fn tick(&mut self) -> EvalResult<()> {
        self.steps += 1;
        if self.steps > self.step_budget {
            Err(EvalError::BudgetExhausted)
        } else {
            Ok(())
        }
    }

    /// Evaluate an expression in the current scope.
    pub fn eval(&mut self, expression: &Expression) -> EvalResult<Int> {
        self.tick()?;
        match expression {
            Expression::IntegerLiteral(value) => Ok(*value),
            Expression::Identifier(name) => self.eval_identifier(name),
            Expression::Binary { operator, lhs, rhs } => self.eval_binary(*operator, lhs, rhs),
            Expression::Assignment { name, expression } => self.eval_assignment(name, expression),
            Expression::Block(elements) => self.eval_block(elements),
            Expression::If {
                condition,
                then_clause,
                else_clause,
            } => self.eval_if(condition, then_clause, else_clause.as_deref()),
            Expression::While { condition, body } => self.eval_while(condition, body),
            Expression::Call { name, args } => self.eval_call(name, args),
            Expression::Println(arg) => self.eval_println(arg),
        }
    }

    fn eval_identifier(&self, name: &str) -> EvalResult<Int> {
        self.env
            .get(name)
            .ok_or_else(|| EvalError::UnboundIdentifier(name.to_string()))
    }

    fn eval_binary(
        &mut self,
        operator: Operator,
        lhs: &Expression,
        rhs: &Expression,
    ) -> EvalResult<Int> {
        // Left before right; both sides always evaluate. The language
        // has no short-circuit forms.
        let l = self.eval(lhs)?;
        let r = self.eval(rhs)?;
        match operator {
            Operator::Add => l
                .checked_add(r)
                .ok_or(EvalError::ArithmeticOverflow(operator)),
            Operator::Subtract => l
                .checked_sub(r)
                .ok_or(EvalError::ArithmeticOverflow(operator)),
            Operator::Multiply => l
                .checked_mul(r)
                .ok_or(EvalError::ArithmeticOverflow(operator)),
            Operator::Divide => {
                if r == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                // MIN / -1 is the one remaining overflow case.
                l.checked_div(r)
                    .ok_or(EvalError::ArithmeticOverflow(operator))
            }
            Operator::LessThan => Ok(Int::from(l < r)),
            Operator::LessOrEqual => Ok(Int::from(l <= r)),
            Operator::GreaterThan => Ok(Int::from(l > r)),
            Operator::GreaterOrEqual => Ok(Int::from(l >= r)),
            Operator::EqualEqual => Ok(Int::from(l == r)),
            Operator::NotEqual => Ok(Int::from(l != r)),
        }
    }

    fn eval_assignment(&mut self, name: &str, expression: &Expression) -> EvalResult<Int> {
        let value = self.eval(expression)?;
        self.env.assign(name, value);
        Ok(value)
    }

    fn eval_block(&mut self, elements: &[Expression]) -> EvalResult<Int> {
        let mut last = 0;
        for element in elements {
            last = self.eval(element)?;
        }
        Ok(last)
    }

    fn eval_if(
        &mut self,
        condition: &Expression,
        then_clause: &Expression,
        else_clause: Option<&Expression>,
    ) -> EvalResult<Int> {
        // Truth is exactly 1; any other value selects the else path.
        if self.eval(condition)? == 1 {
            self.eval(then_clause)
        } else if let Some(else_clause) = else_clause {
            self.eval(else_clause)
        } else {
            // A missing else clause yields 1.
            Ok(1)
        }
    }

    fn eval_while(&mut self, condition: &Expression, body: &Expression) -> EvalResult<Int> {
        while self.eval(condition)? == 1 {
            self.eval(body)?;
        }
        // A while always yields 1, even after zero iterations.
        Ok(1)
    }

    fn eval_call(&mut self, name: &str, args: &[Expression]) -> EvalResult<Int> {
        let definition = self
            .functions
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UnknownFunction(name.to_string()))?;

        if args.len() != definition.params.len() {
            return Err(EvalError::ArityMismatch {
                name: name.to_string(),
                expected: definition.params.len(),
                actual: args.len(),
            });
        }

        // Arguments evaluate in the caller's scope, before the callee
        // frame exists.
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg)?);
        }

        if self.depth >= self.max_depth {
            return Err(EvalError::StackExhausted);
        }
        self.depth += 1;

        // The new frame chains to the caller's active scope, not the
        // definition site: the language is dynamically scoped.
        self.env.push_frame();
        for (param, value) in definition.params.iter().zip(values) {
            self.env.define(param, value);
        }
        let result = self.eval(&definition.body);
        self.env.pop_frame();
        self.depth -= 1;

        result
    }

    fn eval_println(&mut self, arg: &Expression) -> EvalResult<Int> {
        let value = self.eval(arg)?;
        self.printed.push(value);
        Ok(value)
    }
}
