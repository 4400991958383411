use super::locations::Location;
use super::tokenizer::{Token, TokenType};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("invalid character: '{character}' at {location}")]
    InvalidCharacter { character: char, location: Location },
    #[error("string not closed: {text} (opened at {location})")]
    UnterminatedString { text: String, location: Location },
    #[error("integer literal out of range: {literal} at {location}")]
    IntegerOverflow { literal: String, location: Location },
}

/// A required token was missing or of the wrong kind.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid token: {}, expected {}", describe_found(.found), join_expected(.expected))]
pub struct ParseError {
    pub(crate) found: Option<Token>,
    pub(crate) expected: Vec<&'static str>,
    /// Index of `found` in the token sequence.
    pub(crate) position: usize,
}

impl ParseError {
    pub(crate) fn new(found: Option<&Token>, expected: &'static str, position: usize) -> Self {
        Self {
            found: found.cloned(),
            expected: vec![expected],
            position,
        }
    }

    /// Combines two failures of alternatives tried at the same token.
    pub(crate) fn or(mut self, other: Self) -> Self {
        if self.position != other.position {
            return if self.position > other.position { self } else { other };
        }
        for expected in other.expected {
            if !self.expected.contains(&expected) {
                self.expected.push(expected);
            }
        }
        self
    }

    pub fn found(&self) -> Option<&Token> {
        self.found.as_ref()
    }

    pub fn expected(&self) -> &[&'static str] {
        &self.expected
    }

    /// True when the input ran out before the parser was satisfied.
    pub fn at_end(&self) -> bool {
        self.found
            .as_ref()
            .map_or(true, |token| token.typ == TokenType::ENDMARKER)
    }
}

fn describe_found(found: &Option<Token>) -> String {
    match found {
        Some(token) => token.to_string(),
        None => "end of tokens".to_string(),
    }
}

fn join_expected(expected: &[&'static str]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}
