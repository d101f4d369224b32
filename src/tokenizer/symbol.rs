//! # Symbol Token Handling
//!
//! The DSL has no expressions, so its only symbols are the structural
//! [`Delimiter`]s: the braces around a model body, the `:` after a
//! declaration keyword, and the `,` and `=` of `key=value` pairs.

use std::fmt;

use nom::{
    branch::alt,
    character::complete::char,
    combinator::{map, value},
    error::context,
};

use super::token::{ParserResult, Token};

/// Represents delimiters in the model DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Opening brace (`{`) after the model name
    OpenBrace,
    /// Closing brace (`}`) ending the model body
    CloseBrace,
    /// Colon (`:`) after `input` and `layer`
    Colon,
    /// Comma (`,`) between `key=value` pairs
    Comma,
    /// Equal sign (`=`) binding a key to its value
    Equal,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::OpenBrace => '{',
            Delimiter::CloseBrace => '}',
            Delimiter::Colon => ':',
            Delimiter::Comma => ',',
            Delimiter::Equal => '=',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Parses a delimiter token from the input string.
///
/// # Examples
///
/// ```
/// # use ailang::tokenizer::symbol::{parse_delimiter, Delimiter};
/// # use ailang::tokenizer::token::Token;
/// let (rest, token) = parse_delimiter("{ }").unwrap();
/// assert_eq!(token, Token::Delimiter(Delimiter::OpenBrace));
/// assert_eq!(rest, " }");
/// ```
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_delimiter(input: &str) -> ParserResult<Token> {
    context(
        "delimiter",
        map(
            alt((
                value(Delimiter::OpenBrace, char('{')),
                value(Delimiter::CloseBrace, char('}')),
                value(Delimiter::Colon, char(':')),
                value(Delimiter::Comma, char(',')),
                value(Delimiter::Equal, char('=')),
            )),
            Token::Delimiter,
        ),
    )(input)
}
