mod interpreter;
mod parser;

use std::io::Write;

use thiserror::Error;

pub use interpreter::{evaluate, Environment, FlowControl, Interpreter, RuntimeError, Value};
pub use parser::{
    parse, parse_interactive, tokenize_string, BinaryOperator, Expression, LexError, Locatable,
    Location, LogicalOperator, Name, Operator, ParseError, ParserState, Program, Span, Statement,
    Token, TokenType, Tokenizer,
};

/// Any failure of the pipeline, tagged with the stage it came from.
#[derive(Debug, Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Tokenizes and parses `source`.
pub fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize_string(source)?;
    Ok(parse(&tokens)?)
}

/// Runs `source` as a whole program, writing `print` output to `output`.
pub fn run<W: Write>(source: &str, output: W) -> Result<Value, Error> {
    let program = parse_source(source)?;
    Ok(Interpreter::new(output).run(&program)?)
}
