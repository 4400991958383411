use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

use crate::parser::{
    BinaryOperator, Expression, Locatable, LogicalOperator, Operator, Program, Span, Statement,
};

mod environment;
mod value;

pub use environment::Environment;
pub use value::Value;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("variable already defined: {name} at {span}")]
    AlreadyDefined { name: String, span: Span },
    #[error("variable not defined: {name} at {span}")]
    NotDefined { name: String, span: Span },
    #[error("type mismatch: cannot apply `{operator}` to {left} and {right} at {span}")]
    TypeMismatch {
        operator: String,
        left: &'static str,
        right: &'static str,
        span: Span,
    },
    #[error("division by zero at {span}")]
    DivisionByZero { span: Span },
    #[error("integer overflow in {left} {operator} {right} at {span}")]
    Overflow {
        operator: BinaryOperator,
        left: i64,
        right: i64,
        span: Span,
    },
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

pub enum FlowControl {
    NextStatement,
    Return(Value),
}

/// Tree-walking evaluator. Owns the environment, so bindings made by one
/// `execute` call are visible to the next.
pub struct Interpreter<W> {
    environment: Environment,
    output: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(output: W) -> Self {
        Self {
            environment: Environment::new(),
            output,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs `program` to completion; a program that never returns yields `0`.
    pub fn run(&mut self, program: &Program) -> Result<Value, RuntimeError> {
        Ok(self.execute(program)?.unwrap_or_default())
    }

    /// Runs statements in order up to the first `return`.
    pub fn execute(&mut self, program: &Program) -> Result<Option<Value>, RuntimeError> {
        for statement in program.statements() {
            if let FlowControl::Return(value) = self.evaluate(statement)? {
                debug!(%value, "returned");
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    pub fn evaluate(&mut self, statement: &Statement) -> Result<FlowControl, RuntimeError> {
        match statement {
            Statement::Let(name, expr) => {
                let value = self.evaluate_expr(expr)?;
                self.environment.define(name, value)?;
                Ok(FlowControl::NextStatement)
            }
            Statement::Print(expr) => {
                let value = match expr {
                    Some(expr) => self.evaluate_expr(expr)?,
                    None => Value::String(String::new()),
                };
                writeln!(self.output, "{value}")?;
                self.output.flush()?;
                Ok(FlowControl::NextStatement)
            }
            Statement::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.evaluate_expr(expr)?,
                    None => Value::default(),
                };
                Ok(FlowControl::Return(value))
            }
        }
    }

    /// Walks the right spine of an operator chain iteratively: left operands are
    /// evaluated in source order, then the operators are applied from the right.
    fn evaluate_expr(&self, expression: &Expression) -> Result<Value, RuntimeError> {
        let mut pending = Vec::new();
        let mut current = expression;
        let mut value = loop {
            match current {
                Expression::Integer(value) => break Value::Integer(*value),
                Expression::String(value) => break Value::String(value.clone()),
                Expression::Boolean(value) => break Value::Boolean(*value),
                Expression::Identifier(name) => break self.environment.get(name)?.clone(),
                Expression::BinaryExpression(lhs, op, rhs) => {
                    pending.push(PendingOperation::Binary(op, self.evaluate_expr(lhs)?));
                    current = &**rhs;
                }
                Expression::LogicalExpression(lhs, op, rhs) => {
                    pending.push(PendingOperation::Logical(op, self.evaluate_expr(lhs)?));
                    current = &**rhs;
                }
            }
        };
        while let Some(operation) = pending.pop() {
            value = match operation {
                PendingOperation::Binary(op, left) => binary_operation(op, left, value)?,
                PendingOperation::Logical(op, left) => logical_operation(op, left, value)?,
            };
        }
        Ok(value)
    }
}

// An operator whose left operand is known, waiting for its right operand.
enum PendingOperation<'e> {
    Binary(&'e Operator<BinaryOperator>, Value),
    Logical(&'e Operator<LogicalOperator>, Value),
}

/// Runs `program` on a fresh interpreter that prints to standard output.
pub fn evaluate(program: &Program) -> Result<Value, RuntimeError> {
    Interpreter::new(io::stdout()).run(program)
}

fn binary_operation(
    op: &Operator<BinaryOperator>,
    left: Value,
    right: Value,
) -> Result<Value, RuntimeError> {
    match (op.kind, left, right) {
        (BinaryOperator::Plus, left @ Value::String(_), right)
        | (BinaryOperator::Plus, left, right @ Value::String(_)) => {
            Ok(Value::String(format!("{left}{right}")))
        }
        (BinaryOperator::Plus, Value::Integer(a), Value::Integer(b)) => {
            checked(op, a, b, i64::checked_add)
        }
        (BinaryOperator::Minus, Value::Integer(a), Value::Integer(b)) => {
            checked(op, a, b, i64::checked_sub)
        }
        (BinaryOperator::Times, Value::Integer(a), Value::Integer(b)) => {
            checked(op, a, b, i64::checked_mul)
        }
        (BinaryOperator::Divide, Value::Integer(_), Value::Integer(0)) => {
            Err(RuntimeError::DivisionByZero { span: op.span() })
        }
        (BinaryOperator::Divide, Value::Integer(a), Value::Integer(b)) => {
            checked(op, a, b, i64::checked_div)
        }
        (_, left, right) => Err(type_mismatch(op, &left, &right)),
    }
}

fn logical_operation(
    op: &Operator<LogicalOperator>,
    left: Value,
    right: Value,
) -> Result<Value, RuntimeError> {
    match (op.kind, left, right) {
        (LogicalOperator::And, Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(a && b)),
        (LogicalOperator::Or, Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(a || b)),
        (_, left, right) => Err(type_mismatch(op, &left, &right)),
    }
}

fn checked(
    op: &Operator<BinaryOperator>,
    left: i64,
    right: i64,
    operation: fn(i64, i64) -> Option<i64>,
) -> Result<Value, RuntimeError> {
    operation(left, right)
        .map(Value::Integer)
        .ok_or_else(|| RuntimeError::Overflow {
            operator: op.kind,
            left,
            right,
            span: op.span(),
        })
}

fn type_mismatch<K>(op: &Operator<K>, left: &Value, right: &Value) -> RuntimeError
where
    K: std::fmt::Display,
{
    RuntimeError::TypeMismatch {
        operator: op.kind.to_string(),
        left: left.type_name(),
        right: right.type_name(),
        span: op.span(),
    }
}

#[cfg(test)]
mod test;
