use super::locations::Span;
use super::tokenizer::{Token, TokenType as TT};
use derivative::Derivative;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program(pub Vec<Statement>);

impl Program {
    pub fn statements(&self) -> &[Statement] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(Name, Expression),
    Print(Option<Expression>),
    Return(Option<Expression>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Integer(i64),
    String(String),
    Boolean(bool),
    Identifier(Name),
    BinaryExpression(Box<Expression>, Operator<BinaryOperator>, Box<Expression>),
    LogicalExpression(Box<Expression>, Operator<LogicalOperator>, Box<Expression>),
}

impl Expression {
    fn take_operands(&mut self, pending: &mut Vec<Expression>) {
        if let Self::BinaryExpression(lhs, _, rhs) | Self::LogicalExpression(lhs, _, rhs) = self {
            pending.push(std::mem::replace(&mut **lhs, Self::Boolean(false)));
            pending.push(std::mem::replace(&mut **rhs, Self::Boolean(false)));
        }
    }
}

// Operator chains nest one level per operator; tear them down with a worklist
// instead of recursive drop glue.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_operands(&mut pending);
        while let Some(mut expression) = pending.pop() {
            expression.take_operands(&mut pending);
        }
    }
}

#[derive(Clone, Derivative)]
#[derivative(PartialEq)]
pub struct Name {
    pub name: String,
    #[derivative(PartialEq = "ignore")]
    pub span: Span,
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Name(\"{}\")", self.name)
    }
}

/// An operator together with the position it was written at.
#[derive(Clone, Derivative)]
#[derivative(Debug, PartialEq)]
pub struct Operator<K> {
    pub kind: K,
    #[derivative(Debug = "ignore", PartialEq = "ignore")]
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Times,
    Divide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Divide => "/",
        })
    }
}

impl std::fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::And => "and",
            Self::Or => "or",
        })
    }
}

/// Either kind of infix operator; both are read from the same position.
#[derive(Debug, Clone)]
pub(crate) enum Infix {
    Binary(Operator<BinaryOperator>),
    Logical(Operator<LogicalOperator>),
}

impl Infix {
    pub(crate) fn apply(self, left: Expression, right: Expression) -> Expression {
        match self {
            Self::Binary(op) => Expression::BinaryExpression(left.into(), op, right.into()),
            Self::Logical(op) => Expression::LogicalExpression(left.into(), op, right.into()),
        }
    }
}

impl From<Token> for Infix {
    fn from(value: Token) -> Self {
        let span = value.span;
        let binary = |kind| Self::Binary(Operator { kind, span });
        let logical = |kind| Self::Logical(Operator { kind, span });
        match value.typ {
            TT::PLUS => binary(BinaryOperator::Plus),
            TT::MINUS => binary(BinaryOperator::Minus),
            TT::STAR => binary(BinaryOperator::Times),
            TT::SLASH => binary(BinaryOperator::Divide),
            TT::AND => logical(LogicalOperator::And),
            TT::OR => logical(LogicalOperator::Or),
            _ => unreachable!(),
        }
    }
}
