use super::ast::{Name, Operator};
use super::tokenizer::Token;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Location {
    /// Moves past `text`, which must be the source consumed from this location.
    pub(crate) fn advance(&mut self, text: &str) {
        for chr in text.chars() {
            if chr == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Source range, `end` exclusive.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub(crate) fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start)
    }
}

pub trait Locatable {
    fn span(&self) -> Span;
}

impl Locatable for Span {
    fn span(&self) -> Span {
        *self
    }
}

impl Locatable for Token {
    fn span(&self) -> Span {
        self.span
    }
}

impl Locatable for Name {
    fn span(&self) -> Span {
        self.span
    }
}

impl<K> Locatable for Operator<K> {
    fn span(&self) -> Span {
        self.span
    }
}
