use super::error::LexError;
use super::locations::{Location, Span};
use const_format::concatcp;
use derivative::Derivative;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

#[derive(Clone, Derivative)]
#[derivative(Debug, PartialEq)]
pub struct Token {
    pub(crate) typ: TokenType,
    pub(crate) lexeme: String,
    #[derivative(Debug = "ignore", PartialEq = "ignore")]
    pub(crate) span: Span,
}

impl Token {
    pub fn typ(&self) -> &TokenType {
        &self.typ
    }

    /// Raw source text of the token; empty for the end-marker.
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.typ {
            TokenType::NUMBER(_)
            | TokenType::STRING(_)
            | TokenType::BOOLEAN(_)
            | TokenType::NAME(_) => {
                write!(f, "{} '{}' at {}", self.typ, self.lexeme, self.span)
            }
            _ => write!(f, "{} at {}", self.typ, self.span),
        }
    }
}

#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, PartialEq, Debug)]
pub enum TokenType {
    ENDMARKER,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    AND,
    OR,
    LPAR,
    RPAR,
    SEMI,
    EQUAL,
    RETURN,
    LET,
    PRINT,
    NUMBER(i64),
    STRING(String),
    BOOLEAN(bool),
    NAME(String),
}

impl TokenType {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Self::ENDMARKER => "end of input",
            Self::PLUS => "`+`",
            Self::MINUS => "`-`",
            Self::STAR => "`*`",
            Self::SLASH => "`/`",
            Self::AND => "`and`",
            Self::OR => "`or`",
            Self::LPAR => "`(`",
            Self::RPAR => "`)`",
            Self::SEMI => "`;`",
            Self::EQUAL => "`=`",
            Self::RETURN => "`return`",
            Self::LET => "`let`",
            Self::PRINT => "`print`",
            Self::NUMBER(_) => "integer",
            Self::STRING(_) => "string",
            Self::BOOLEAN(_) => "boolean",
            Self::NAME(_) => "identifier",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

const KEYWORDS: [(&str, TokenType); 3] = [
    ("return", TokenType::RETURN),
    ("let", TokenType::LET),
    ("print", TokenType::PRINT),
];

const BOOLEANS: [(&str, bool); 2] = [("true", true), ("false", false)];

const LOGICAL_OPERATORS: [(&str, TokenType); 2] =
    [("and", TokenType::AND), ("or", TokenType::OR)];

const SIMPLE_TOKENS: [(char, TokenType); 8] = [
    ('+', TokenType::PLUS),
    ('-', TokenType::MINUS),
    ('*', TokenType::STAR),
    ('/', TokenType::SLASH),
    ('(', TokenType::LPAR),
    (')', TokenType::RPAR),
    (';', TokenType::SEMI),
    ('=', TokenType::EQUAL),
];

const S_DIGIT: &str = "[0-9]";
const S_LETTER: &str = "[A-Za-z]";
const S_WHITESPACE: &str = r"^\s+";
const S_NUMBER: &str = concatcp!("^", S_DIGIT, "+");
const S_WORD: &str = concatcp!("^", S_LETTER, "(?:", S_LETTER, "|", S_DIGIT, ")*");

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_WHITESPACE).expect("Error compiling regex."));
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(S_NUMBER).expect("Error compiling regex."));
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(S_WORD).expect("Error compiling regex."));

/// Lazily scans a source text into tokens.
///
/// Yields exactly one `ENDMARKER` as its last token and nothing after it. The first
/// error ends the sequence as well.
#[derive(Clone, Debug)]
pub struct Tokenizer<'s> {
    source: &'s str,
    offset: usize,
    location: Location,
    finished: bool,
}

impl<'s> Tokenizer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            offset: 0,
            location: Location::default(),
            finished: false,
        }
    }

    fn rest(&self) -> &'s str {
        &self.source[self.offset..]
    }

    fn advance(&mut self, len: usize) -> &'s str {
        let consumed = &self.source[self.offset..self.offset + len];
        self.location.advance(consumed);
        self.offset += len;
        consumed
    }

    /// Consumes `len` bytes as a token of type `typ`.
    fn emit(&mut self, typ: TokenType, len: usize) -> Token {
        let start = self.location;
        let lexeme = self.advance(len).to_string();
        Token {
            typ,
            lexeme,
            span: Span::new(start, self.location),
        }
    }

    fn skip_whitespace(&mut self) {
        if let Some(m) = WHITESPACE.find(self.rest()) {
            self.advance(m.end());
        }
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let Some(chr) = self.rest().chars().next() else {
            return Ok(self.emit(TokenType::ENDMARKER, 0));
        };
        if chr.is_ascii_digit() {
            self.number()
        } else if chr.is_ascii_alphabetic() {
            Ok(self.word())
        } else if chr == '\'' || chr == '"' {
            self.string(chr)
        } else {
            self.simple_token(chr)
        }
    }

    fn number(&mut self) -> Result<Token, LexError> {
        let rest = self.rest();
        let len = NUMBER.find(rest).map_or(1, |m| m.end());
        let literal = &rest[..len];
        match literal.parse::<i64>() {
            Ok(value) => Ok(self.emit(TokenType::NUMBER(value), len)),
            Err(_) => Err(LexError::IntegerOverflow {
                literal: literal.to_string(),
                location: self.location,
            }),
        }
    }

    fn word(&mut self) -> Token {
        let rest = self.rest();
        let len = WORD.find(rest).map_or(1, |m| m.end());
        let word = &rest[..len];

        let typ = if let Some((_, typ)) = KEYWORDS.iter().find(|(kw, _)| *kw == word) {
            typ.clone()
        } else if let Some((_, value)) = BOOLEANS.iter().find(|(b, _)| *b == word) {
            TokenType::BOOLEAN(*value)
        } else if let Some((_, typ)) = LOGICAL_OPERATORS.iter().find(|(op, _)| *op == word) {
            typ.clone()
        } else {
            TokenType::NAME(word.to_string())
        };
        self.emit(typ, len)
    }

    /// Everything up to the next occurrence of `quote` is taken verbatim.
    fn string(&mut self, quote: char) -> Result<Token, LexError> {
        let body = &self.rest()[quote.len_utf8()..];
        match body.find(quote) {
            Some(end) => {
                let text = body[..end].to_string();
                Ok(self.emit(TokenType::STRING(text), end + 2 * quote.len_utf8()))
            }
            None => Err(LexError::UnterminatedString {
                text: body.to_string(),
                location: self.location,
            }),
        }
    }

    fn simple_token(&mut self, chr: char) -> Result<Token, LexError> {
        match SIMPLE_TOKENS.iter().find(|(c, _)| *c == chr) {
            Some((_, typ)) => Ok(self.emit(typ.clone(), chr.len_utf8())),
            None => Err(LexError::InvalidCharacter {
                character: chr,
                location: self.location,
            }),
        }
    }
}

impl<'s> Iterator for Tokenizer<'s> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = match &token {
            Ok(token) => token.typ == TokenType::ENDMARKER,
            Err(_) => true,
        };
        Some(token)
    }
}

/// Scans the whole of `input`, stopping at the first error.
pub fn tokenize_string(input: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Tokenizer::new(input).collect::<Result<Vec<_>, _>>()?;
    debug!(tokens = tokens.len(), "tokenized source");
    Ok(tokens)
}
