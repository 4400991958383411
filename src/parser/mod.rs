mod ast;
mod combinators;
mod error;
mod grammar;
mod locations;
pub mod tokenizer;

pub use ast::*;
pub use error::{LexError, ParseError};
pub use grammar::parse;
pub use locations::{Locatable, Location, Span};
pub use tokenizer::{tokenize_string, Token, TokenType, Tokenizer};

/// Outcome of parsing one input of an interactive session.
#[derive(Debug)]
pub enum ParserState {
    Complete(Program),
    /// The input stopped inside a string literal or a statement.
    ContinuationNeeded,
    Error(crate::Error),
}

pub fn parse_interactive(input: &str) -> ParserState {
    let tokens = match tokenize_string(input) {
        Ok(tokens) => tokens,
        Err(LexError::UnterminatedString { .. }) => return ParserState::ContinuationNeeded,
        Err(err) => return ParserState::Error(err.into()),
    };
    match parse(&tokens) {
        Ok(program) => ParserState::Complete(program),
        Err(err) if err.at_end() => ParserState::ContinuationNeeded,
        Err(err) => ParserState::Error(err.into()),
    }
}
