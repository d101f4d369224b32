//! # Tokenizer Component
//!
//! Lexical analysis of the model description DSL. Raw text is turned into a
//! stream of [`TokenSpan`](token::TokenSpan)s that the [`parser`](crate::parser)
//! consumes one line at a time.
//!
//! ## Component Structure
//!
//! * [`token`]: Core token types and the [`Tokenizer`](token::Tokenizer) driver
//! * [`keyword`]: Declaration keywords (`model`, `input`, `layer`)
//! * [`symbol`]: The `=` operator and the `{ } : ,` delimiters
//! * [`literal`]: Integer and string literals
//! * [`whitespace`]: Whitespace and newline handling
//! * [`comment`]: `//`, `#` and `/* */` comments
//!
//! Every token records its byte range plus the 1-based line and column it
//! starts on, so parse errors can point at the offending text.
//!
//! ## Usage Example
//!
//! ```rust
//! use ailang::tokenizer::token::{Token, Tokenizer};
//! use ailang::tokenizer::keyword::Keyword;
//!
//! let tokens = Tokenizer::new().tokenize("input: size=4").unwrap();
//! assert_eq!(tokens[0].token, Token::Keyword(Keyword::Input));
//! ```

pub mod comment;
pub mod keyword;
pub mod literal;
pub mod symbol;
pub mod token;
pub mod whitespace;
