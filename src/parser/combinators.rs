use super::error::ParseError;
use super::tokenizer::{Token, TokenType};

pub(crate) type ParseResult<'a, Output> = Result<(Output, ParserInput<'a>), ParseError>;

/// Cursor over the token buffer. Tokens are consumed from the front, one at a time.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParserInput<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> ParserInput<'a> {
    pub(crate) fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn first(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn advance(self) -> Self {
        Self {
            position: self.position + 1,
            ..self
        }
    }

    fn error(&self, expected: &'static str) -> ParseError {
        ParseError::new(self.first(), expected, self.position)
    }
}

// A failing parser has consumed input iff its error lies past the position it
// started at. Alternatives and optional parts only fall through on failures that
// consumed nothing.

pub(crate) trait Parser<'a, Output> {
    fn parse(&self, input: ParserInput<'a>) -> ParseResult<'a, Output>;

    fn map<F, MappedOutput>(self, map_fn: F) -> BoxedParser<'a, MappedOutput>
    where
        Self: Sized + 'a,
        Output: 'a,
        MappedOutput: 'a,
        F: Fn(Output) -> MappedOutput + 'a,
    {
        BoxedParser::new(map(self, map_fn))
    }

    fn or(self, parser: impl Parser<'a, Output> + 'a) -> BoxedParser<'a, Output>
    where
        Self: Sized + 'a,
        Output: 'a,
    {
        let alternative = move |input: ParserInput<'a>| match self.parse(input) {
            Err(first) if first.position == input.position => {
                parser.parse(input).map_err(|second| first.or(second))
            }
            result => result,
        };
        BoxedParser::new(alternative)
    }
}

impl<'a, F, Output> Parser<'a, Output> for F
where
    F: Fn(ParserInput<'a>) -> ParseResult<'a, Output>,
{
    fn parse(&self, input: ParserInput<'a>) -> ParseResult<'a, Output> {
        self(input)
    }
}

pub(crate) struct BoxedParser<'a, Output> {
    parser: Box<dyn Parser<'a, Output> + 'a>,
}

impl<'a, Output> BoxedParser<'a, Output> {
    fn new(parser: impl Parser<'a, Output> + 'a) -> Self {
        Self {
            parser: Box::new(parser),
        }
    }
}

impl<'a, Output> Parser<'a, Output> for BoxedParser<'a, Output> {
    fn parse(&self, input: ParserInput<'a>) -> ParseResult<'a, Output> {
        self.parser.parse(input)
    }
}

pub(crate) fn pair<'a, R1, R2>(
    parser1: impl Parser<'a, R1>,
    parser2: impl Parser<'a, R2>,
) -> impl Parser<'a, (R1, R2)> {
    move |input: ParserInput<'a>| {
        let (result1, next_input) = parser1.parse(input)?;
        let (result2, rest) = parser2.parse(next_input)?;
        Ok(((result1, result2), rest))
    }
}

pub(crate) fn map<'a, F, A, B>(parser: impl Parser<'a, A>, map_fn: F) -> impl Parser<'a, B>
where
    F: Fn(A) -> B,
{
    move |input: ParserInput<'a>| {
        parser
            .parse(input)
            .map(|(result, rest)| (map_fn(result), rest))
    }
}

pub(crate) fn left<'a, A, B>(
    left_parser: impl Parser<'a, A>,
    right_parser: impl Parser<'a, B>,
) -> impl Parser<'a, A> {
    map(pair(left_parser, right_parser), |(left, _right)| left)
}

pub(crate) fn right<'a, A, B>(
    left_parser: impl Parser<'a, A>,
    right_parser: impl Parser<'a, B>,
) -> impl Parser<'a, B> {
    map(pair(left_parser, right_parser), |(_left, right)| right)
}

pub(crate) fn maybe<'a, R>(parser: impl Parser<'a, R>) -> impl Parser<'a, Option<R>> {
    move |input: ParserInput<'a>| match parser.parse(input) {
        Ok((value, rest)) => Ok((Some(value), rest)),
        Err(err) if err.position == input.position => Ok((None, input)),
        Err(err) => Err(err),
    }
}

/// Repeats `parser` for as long as it succeeds. Stops quietly on a failure that
/// consumed nothing.
pub(crate) fn many<'a, R>(parser: impl Parser<'a, R>) -> impl Parser<'a, Vec<R>> {
    move |mut input: ParserInput<'a>| {
        let mut result = Vec::new();
        loop {
            match parser.parse(input) {
                Ok((next, rest)) => {
                    result.push(next);
                    input = rest;
                }
                Err(err) if err.position == input.position => return Ok((result, input)),
                Err(err) => return Err(err),
            }
        }
    }
}

/// Repeats `parser` until `end` succeeds. A failure of both at the same token
/// reports what either of them expected.
pub(crate) fn many_till<'a, R, E>(
    parser: impl Parser<'a, R>,
    end: impl Parser<'a, E>,
) -> impl Parser<'a, Vec<R>> {
    move |mut input: ParserInput<'a>| {
        let mut result = Vec::new();
        loop {
            let end_error = match end.parse(input) {
                Ok((_, rest)) => return Ok((result, rest)),
                Err(err) => err,
            };
            match parser.parse(input) {
                Ok((next, rest)) => {
                    result.push(next);
                    input = rest;
                }
                Err(err) => return Err(err.or(end_error)),
            }
        }
    }
}

pub(crate) fn tok<'a>(expected_type: TokenType) -> impl Parser<'a, Token> {
    move |input: ParserInput<'a>| match input.first() {
        Some(token) if token.typ == expected_type => Ok((token.clone(), input.advance())),
        _ => Err(input.error(expected_type.describe())),
    }
}

/// Consumes one token if `select_fn` accepts it.
pub(crate) fn select<'a, R, F>(expected: &'static str, select_fn: F) -> impl Parser<'a, R>
where
    F: Fn(&Token) -> Option<R>,
{
    move |input: ParserInput<'a>| match input.first().and_then(&select_fn) {
        Some(value) => Ok((value, input.advance())),
        None => Err(input.error(expected)),
    }
}
