use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, recognize},
    error::context,
    sequence::{delimited, pair},
};

use super::token::{ParserResult, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Integer(i64),
    /// Quoted string, without escapes. The quotes are not part of the value.
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::String(value) => write!(f, "\"{}\"", value),
        }
    }
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_string_literal(input: &str) -> ParserResult<Literal> {
    context(
        "string literal",
        map(
            delimited(
                char('"'),
                take_while(|c| c != '"' && c != '\n' && c != '\r'),
                char('"'),
            ),
            |content: &str| Literal::String(content.to_string()),
        ),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_integer_literal(input: &str) -> ParserResult<Literal> {
    context(
        "integer literal",
        map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
            s.parse::<i64>().map(Literal::Integer)
        }),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_literal(input: &str) -> ParserResult<Token> {
    context(
        "literal",
        map(
            alt((parse_string_literal, parse_integer_literal)),
            Token::Literal,
        ),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_string() {
        let (rest, result) = parse_string_literal("\"relu\", units=3").unwrap();
        assert_eq!(rest, ", units=3");
        assert_eq!(result, Literal::String("relu".to_string()));
    }

    #[test]
    fn test_empty_string() {
        let (rest, result) = parse_string_literal("\"\"").unwrap();
        assert_eq!(rest, "");
        assert_eq!(result, Literal::String(String::new()));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(parse_string_literal("\"relu").is_err());
        assert!(parse_string_literal("\"relu\nsigmoid\"").is_err());
    }

    #[test]
    fn test_number_literals() {
        let (rest, result) = parse_integer_literal("123").unwrap();
        assert_eq!(result, Literal::Integer(123));
        assert_eq!(rest, "");

        let (rest, result) = parse_integer_literal("-5,").unwrap();
        assert_eq!(result, Literal::Integer(-5));
        assert_eq!(rest, ",");
    }

    #[test]
    fn test_integer_overflow_is_error() {
        assert!(parse_integer_literal("99999999999999999999999").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Literal::Integer(8).to_string(), "8");
        assert_eq!(Literal::String("relu".into()).to_string(), "\"relu\"");
    }
}
