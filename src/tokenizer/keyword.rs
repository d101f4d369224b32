use std::str::FromStr;

use nom::{combinator::map_res, error::context};

use super::token::{parse_word, ParserResult, Token};

/// Words that open a declaration line.
///
/// Keys inside a declaration (`size`, `units`, `activation`) are plain
/// identifiers; only these three words are reserved.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    Model,
    Input,
    Layer,
}

// Matches a whole word so that `models` stays an identifier.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_keyword(input: &str) -> ParserResult<Token> {
    context(
        "keyword",
        map_res(parse_word, |word: &str| {
            Keyword::from_str(word).map(Token::Keyword)
        }),
    )(input)
}
