//! # Whitespace Token Handling
//!
//! Whitespace and line breaks are kept as tokens so that spans stay exact.
//! The parser drops them together with comments before matching a line.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    combinator::map,
    error::context,
};

use super::token::{ParserResult, Token};

/// Parses spaces and tabs into a [`Token::Whitespace`].
///
/// ```
/// # use ailang::tokenizer::whitespace::parse_whitespace;
/// # use ailang::tokenizer::token::Token;
/// let (rest, token) = parse_whitespace("   units").unwrap();
/// assert_eq!(token, Token::Whitespace("   ".to_string()));
/// assert_eq!(rest, "units");
/// ```
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_whitespace(input: &str) -> ParserResult<Token> {
    context(
        "whitespace expected",
        map(take_while1(|c| c == ' ' || c == '\t'), |ws: &str| {
            Token::Whitespace(ws.to_string())
        }),
    )(input)
}

/// Parses `\n` or `\r\n` into a [`Token::Newline`].
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_newline(input: &str) -> ParserResult<Token> {
    context(
        "newline expected",
        map(alt((tag("\r\n"), tag("\n"))), |_| Token::Newline),
    )(input)
}
