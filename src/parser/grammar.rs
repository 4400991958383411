// Grammar, in the notation of the rule comments below:
//
// * Strings in single quotes denote KEYWORDS or punctuation
// * Upper case names (NAME, NUMBER, ...) denote token types
// * [ e ] is an optional e, e* is zero or more occurrences of e
//
// There is no precedence and no grouping: every operator takes the whole remaining
// expression as its right operand.

use super::ast::*;
use super::combinators::*;
use super::error::ParseError;
use super::tokenizer::{Token, TokenType as TT};
use tracing::debug;

pub fn parse(input: &[Token]) -> Result<Program, ParseError> {
    let (program, _) = file_.parse(ParserInput::new(input))?;
    debug!(statements = program.0.len(), "parsed program");
    Ok(program)
}

// file: statement* ENDMARKER
fn file_<'a>(input: ParserInput<'a>) -> ParseResult<'a, Program> {
    many_till(statement, tok(TT::ENDMARKER))
        .map(Program)
        .parse(input)
}

// statement: return_stmt | let_stmt | print_stmt
fn statement<'a>(input: ParserInput<'a>) -> ParseResult<'a, Statement> {
    return_stmt.or(let_stmt).or(print_stmt).parse(input)
}

// return_stmt: 'return' [expression] ';'
fn return_stmt<'a>(input: ParserInput<'a>) -> ParseResult<'a, Statement> {
    right(tok(TT::RETURN), left(maybe(expression), tok(TT::SEMI)))
        .map(Statement::Return)
        .parse(input)
}

// let_stmt: 'let' NAME '=' expression ';'
fn let_stmt<'a>(input: ParserInput<'a>) -> ParseResult<'a, Statement> {
    right(
        tok(TT::LET),
        pair(left(name, tok(TT::EQUAL)), left(expression, tok(TT::SEMI))),
    )
    .map(|(name, value)| Statement::Let(name, value))
    .parse(input)
}

// print_stmt: 'print' [expression] ';'
fn print_stmt<'a>(input: ParserInput<'a>) -> ParseResult<'a, Statement> {
    right(tok(TT::PRINT), left(maybe(expression), tok(TT::SEMI)))
        .map(Statement::Print)
        .parse(input)
}

// expression: term [operator expression]
//
// Read as `term (operator term)*` and folded from the right, so long chains
// don't recurse.
fn expression<'a>(input: ParserInput<'a>) -> ParseResult<'a, Expression> {
    pair(term, many(pair(operator, term)))
        .map(|(first, rest)| fold_right(first, rest))
        .parse(input)
}

// a o1 b o2 c  =>  a o1 (b o2 c)
fn fold_right(first: Expression, mut rest: Vec<(Infix, Expression)>) -> Expression {
    let (mut op, mut rhs) = match rest.pop() {
        Some(last) => last,
        None => return first,
    };
    while let Some((previous, lhs)) = rest.pop() {
        rhs = op.apply(lhs, rhs);
        op = previous;
    }
    op.apply(first, rhs)
}

// operator: '+' | '-' | '*' | '/' | 'and' | 'or'
fn operator<'a>(input: ParserInput<'a>) -> ParseResult<'a, Infix> {
    tok(TT::PLUS)
        .or(tok(TT::MINUS))
        .or(tok(TT::STAR))
        .or(tok(TT::SLASH))
        .or(tok(TT::AND))
        .or(tok(TT::OR))
        .map(Infix::from)
        .parse(input)
}

// term: BOOLEAN | NUMBER | STRING | NAME
fn term<'a>(input: ParserInput<'a>) -> ParseResult<'a, Expression> {
    boolean
        .or(integer)
        .or(string)
        .or(name.map(Expression::Identifier))
        .parse(input)
}

fn boolean<'a>(input: ParserInput<'a>) -> ParseResult<'a, Expression> {
    select("boolean", |token| match &token.typ {
        TT::BOOLEAN(value) => Some(Expression::Boolean(*value)),
        _ => None,
    })
    .parse(input)
}

fn integer<'a>(input: ParserInput<'a>) -> ParseResult<'a, Expression> {
    select("integer", |token| match &token.typ {
        TT::NUMBER(value) => Some(Expression::Integer(*value)),
        _ => None,
    })
    .parse(input)
}

fn string<'a>(input: ParserInput<'a>) -> ParseResult<'a, Expression> {
    select("string", |token| match &token.typ {
        TT::STRING(text) => Some(Expression::String(text.clone())),
        _ => None,
    })
    .parse(input)
}

fn name<'a>(input: ParserInput<'a>) -> ParseResult<'a, Name> {
    select("identifier", |token| match &token.typ {
        TT::NAME(name) => Some(Name {
            name: name.clone(),
            span: token.span,
        }),
        _ => None,
    })
    .parse(input)
}
