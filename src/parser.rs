//! # DSL Parser
//!
//! Turns a model description into a validated [`ModelSpec`].
//!
//! ```text
//! model TestModel {
//!     input: size=4
//!     layer: units=8, activation="relu"
//!     layer: units=2, activation="sigmoid"
//! }
//! ```
//!
//! The format is line oriented. Each line is classified by its first word:
//! `model`, `input`, `layer`, or a closing `}`. A classified line is tokenized
//! and must match its declaration shape exactly; `key=value` pairs are looked
//! up by name, so their order does not matter. A recognized line with an
//! unexpected shape is a [`ParseError::MalformedLine`].
//!
//! Lines with any other first word, blank lines and comment lines are
//! skipped without error. This keeps older parsers working on documents
//! that carry declarations they do not know about.
//!
//! Semantic checks run after the last line, in this order: model name,
//! input size, layer count, then per-layer units. A model name must also be
//! usable as a class name in every built-in target, so `model class {` is
//! rejected with [`ParseError::ReservedModelName`].

use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, instrument, trace, warn};

use crate::ast::{ActivationKind, LayerSpec, ModelSpec};
use crate::generator::Target;
use crate::tokenizer::{
    keyword::Keyword,
    literal::Literal,
    symbol::Delimiter,
    token::{parse_word, Token, Tokenizer, TokenizerError},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Model name is missing: no `model` declaration found")]
    EmptyModelName,
    #[error("Model name `{name}` is not an identifier or is a DSL keyword")]
    InvalidModelName { name: String },
    #[error("Model name `{name}` is reserved in {target} output")]
    ReservedModelName { name: String, target: Target },
    #[error("Input size must be a positive integer, got {size}")]
    InvalidInputSize { size: i64 },
    #[error("Model declares no layers")]
    NoLayers,
    #[error("Layer {layer} must have a positive unit count, got {units}")]
    InvalidUnits { layer: usize, units: i64 },
    #[error("Malformed line {line}: {message}")]
    MalformedLine { line: usize, message: String },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete DSL document.
#[instrument(level = "debug", skip(source))]
pub fn parse(source: &str) -> ParseResult<ModelSpec> {
    let mut builder = ModelBuilder::default();

    for (index, text) in source.lines().enumerate() {
        let line = index + 1;
        let Some(kind) = classify_line(text) else {
            trace!(line, "skipping unrecognized line");
            continue;
        };

        let tokens = significant_tokens(text, line)?;
        let malformed = |message: String| ParseError::MalformedLine { line, message };

        match kind {
            LineKind::Model => {
                let name = parse_model_line(&tokens).map_err(malformed)?;
                builder.declare_model(name, line)?;
            }
            LineKind::Input => {
                let size = parse_input_line(&tokens).map_err(malformed)?;
                builder.declare_input(size, line)?;
            }
            LineKind::Layer => {
                let (units, activation) = parse_layer_line(&tokens).map_err(malformed)?;
                builder.add_layer(units, activation_kind(&activation, line));
            }
            LineKind::Close => parse_close_line(&tokens).map_err(malformed)?,
        }
    }

    let spec = builder.build()?;
    debug!(
        name = spec.name(),
        input_size = spec.input_size(),
        layers = spec.layers().len(),
        "parsed model"
    );
    Ok(spec)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Model,
    Input,
    Layer,
    Close,
}

/// `None` for lines the parser does not handle.
fn classify_line(text: &str) -> Option<LineKind> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('}') {
        return Some(LineKind::Close);
    }
    let (_, word) = parse_word(trimmed).ok()?;
    match Keyword::from_str(word).ok()? {
        Keyword::Model => Some(LineKind::Model),
        Keyword::Input => Some(LineKind::Input),
        Keyword::Layer => Some(LineKind::Layer),
    }
}

fn significant_tokens(text: &str, line: usize) -> ParseResult<Vec<Token>> {
    let spans = Tokenizer::at_line(line)
        .tokenize(text)
        .map_err(|e| {
            let TokenizerError::ParseError { found, span, .. } = e;
            ParseError::MalformedLine {
                line,
                message: format!("unexpected input `{}` at column {}", found, span.column),
            }
        })?;
    Ok(spans
        .into_iter()
        .map(|span| span.token)
        .filter(|token| !token.is_trivia())
        .collect())
}

fn activation_kind(name: &str, line: usize) -> ActivationKind {
    match ActivationKind::from_str(name) {
        Ok(kind) => kind,
        Err(_) => {
            warn!(line, activation = name, "unrecognized activation, layer stays linear");
            ActivationKind::Identity
        }
    }
}

// Line grammars. Each step takes the token slice and a position and returns
// the position after what it consumed.

type LineResult<O> = Result<(usize, O), String>;

fn describe(tokens: &[Token], pos: usize) -> String {
    match tokens.get(pos) {
        Some(token) => format!("`{}`", token),
        None => "end of line".to_string(),
    }
}

fn expect_keyword(tokens: &[Token], pos: usize, keyword: Keyword) -> LineResult<()> {
    match tokens.get(pos) {
        Some(Token::Keyword(k)) if *k == keyword => Ok((pos + 1, ())),
        _ => Err(format!(
            "expected `{}`, found {}",
            keyword,
            describe(tokens, pos)
        )),
    }
}

fn expect_delimiter(tokens: &[Token], pos: usize, delimiter: Delimiter) -> LineResult<()> {
    match tokens.get(pos) {
        Some(Token::Delimiter(d)) if *d == delimiter => Ok((pos + 1, ())),
        _ => Err(format!(
            "expected `{}`, found {}",
            delimiter,
            describe(tokens, pos)
        )),
    }
}

fn expect_identifier(tokens: &[Token], pos: usize) -> LineResult<String> {
    match tokens.get(pos) {
        Some(Token::Identifier(name)) => Ok((pos + 1, name.clone())),
        _ => Err(format!(
            "expected identifier, found {}",
            describe(tokens, pos)
        )),
    }
}

fn expect_literal(tokens: &[Token], pos: usize) -> LineResult<Literal> {
    match tokens.get(pos) {
        Some(Token::Literal(literal)) => Ok((pos + 1, literal.clone())),
        _ => Err(format!("expected value, found {}", describe(tokens, pos))),
    }
}

fn expect_end(tokens: &[Token], pos: usize) -> Result<(), String> {
    if pos == tokens.len() {
        Ok(())
    } else {
        Err(format!("unexpected {} at end of line", describe(tokens, pos)))
    }
}

/// `key=value ("," key=value)*` through the end of the line.
fn parse_assignments(tokens: &[Token], pos: usize) -> LineResult<Assignments> {
    let mut pairs = Assignments::default();
    let mut pos = pos;
    loop {
        let (next, key) = expect_identifier(tokens, pos)?;
        let (next, _) = expect_delimiter(tokens, next, Delimiter::Equal)?;
        let (next, value) = expect_literal(tokens, next)?;
        pairs.insert(key, value)?;
        pos = next;

        match tokens.get(pos) {
            Some(Token::Delimiter(Delimiter::Comma)) => pos += 1,
            _ => return Ok((pos, pairs)),
        }
    }
}

#[derive(Debug, Default)]
struct Assignments {
    pairs: Vec<(String, Literal)>,
}

impl Assignments {
    fn insert(&mut self, key: String, value: Literal) -> Result<(), String> {
        if self.pairs.iter().any(|(k, _)| *k == key) {
            return Err(format!("duplicate key `{}`", key));
        }
        self.pairs.push((key, value));
        Ok(())
    }

    fn take(&mut self, key: &str) -> Result<Literal, String> {
        let index = self
            .pairs
            .iter()
            .position(|(k, _)| k == key)
            .ok_or_else(|| format!("missing `{}`", key))?;
        Ok(self.pairs.remove(index).1)
    }

    fn take_integer(&mut self, key: &str) -> Result<i64, String> {
        match self.take(key)? {
            Literal::Integer(value) => Ok(value),
            other => Err(format!("`{}` must be an integer, found {}", key, other)),
        }
    }

    fn take_string(&mut self, key: &str) -> Result<String, String> {
        match self.take(key)? {
            Literal::String(value) => Ok(value),
            other => Err(format!(
                "`{}` must be a quoted string, found {}",
                key, other
            )),
        }
    }

    fn reject_unknown(&self, allowed: &[&str]) -> Result<(), String> {
        match self.pairs.iter().find(|(k, _)| !allowed.contains(&k.as_str())) {
            Some((key, _)) => Err(format!("unknown key `{}`", key)),
            None => Ok(()),
        }
    }
}

/// `model IDENT {`
fn parse_model_line(tokens: &[Token]) -> Result<String, String> {
    let (pos, _) = expect_keyword(tokens, 0, Keyword::Model)?;
    let (pos, name) = expect_identifier(tokens, pos)?;
    let (pos, _) = expect_delimiter(tokens, pos, Delimiter::OpenBrace)?;
    expect_end(tokens, pos)?;
    Ok(name)
}

/// `input: size=INT`
fn parse_input_line(tokens: &[Token]) -> Result<i64, String> {
    let (pos, _) = expect_keyword(tokens, 0, Keyword::Input)?;
    let (pos, _) = expect_delimiter(tokens, pos, Delimiter::Colon)?;
    let (pos, mut pairs) = parse_assignments(tokens, pos)?;
    expect_end(tokens, pos)?;
    pairs.reject_unknown(&["size"])?;
    pairs.take_integer("size")
}

/// `layer: units=INT, activation=STRING`
fn parse_layer_line(tokens: &[Token]) -> Result<(i64, String), String> {
    let (pos, _) = expect_keyword(tokens, 0, Keyword::Layer)?;
    let (pos, _) = expect_delimiter(tokens, pos, Delimiter::Colon)?;
    let (pos, mut pairs) = parse_assignments(tokens, pos)?;
    expect_end(tokens, pos)?;
    pairs.reject_unknown(&["units", "activation"])?;
    let units = pairs.take_integer("units")?;
    let activation = pairs.take_string("activation")?;
    Ok((units, activation))
}

/// `}`
fn parse_close_line(tokens: &[Token]) -> Result<(), String> {
    let (pos, _) = expect_delimiter(tokens, 0, Delimiter::CloseBrace)?;
    expect_end(tokens, pos)
}

#[derive(Debug, Default)]
struct ModelBuilder {
    name: Option<(String, usize)>,
    input_size: Option<(i64, usize)>,
    layers: Vec<(i64, ActivationKind)>,
}

impl ModelBuilder {
    fn declare_model(&mut self, name: String, line: usize) -> ParseResult<()> {
        if let Some((_, first)) = &self.name {
            return Err(ParseError::MalformedLine {
                line,
                message: format!("duplicate `model` declaration, first declared on line {}", first),
            });
        }
        self.name = Some((name, line));
        Ok(())
    }

    fn declare_input(&mut self, size: i64, line: usize) -> ParseResult<()> {
        if let Some((_, first)) = &self.input_size {
            return Err(ParseError::MalformedLine {
                line,
                message: format!("duplicate `input` declaration, first declared on line {}", first),
            });
        }
        self.input_size = Some((size, line));
        Ok(())
    }

    fn add_layer(&mut self, units: i64, activation: ActivationKind) {
        self.layers.push((units, activation));
    }

    fn build(self) -> ParseResult<ModelSpec> {
        let (name, _) = self.name.ok_or(ParseError::EmptyModelName)?;
        ModelSpec::check_name(&name)?;

        let size = self.input_size.map(|(size, _)| size).unwrap_or(0);
        let input_size = usize::try_from(size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or(ParseError::InvalidInputSize { size })?;

        if self.layers.is_empty() {
            return Err(ParseError::NoLayers);
        }

        let layers = self
            .layers
            .into_iter()
            .enumerate()
            .map(|(index, (units, activation))| {
                usize::try_from(units)
                    .ok()
                    .filter(|units| *units > 0)
                    .map(|units| LayerSpec::new(units, activation))
                    .ok_or(ParseError::InvalidUnits {
                        layer: index + 1,
                        units,
                    })
            })
            .collect::<ParseResult<Vec<_>>>()?;

        ModelSpec::new(name, input_size, layers)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"
        model TestModel {
            input: size=4
            layer: units=8, activation="relu"
            layer: units=2, activation="sigmoid"
        }
    "#;

    fn malformed_line(result: ParseResult<ModelSpec>) -> usize {
        match result {
            Err(ParseError::MalformedLine { line, .. }) => line,
            other => panic!("expected MalformedLine, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_sample() {
        let spec = parse(SAMPLE).unwrap();
        assert_eq!(spec.name(), "TestModel");
        assert_eq!(spec.input_size(), 4);
        assert_eq!(
            spec.layers(),
            &[
                LayerSpec::new(8, ActivationKind::ReLU),
                LayerSpec::new(2, ActivationKind::Sigmoid),
            ]
        );
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line("model M {"), Some(LineKind::Model));
        assert_eq!(classify_line("   input: size=3"), Some(LineKind::Input));
        assert_eq!(classify_line("\tlayer: units=1"), Some(LineKind::Layer));
        assert_eq!(classify_line("  }"), Some(LineKind::Close));
        assert_eq!(classify_line(""), None);
        assert_eq!(classify_line("// comment"), None);
        assert_eq!(classify_line("train: epochs=3"), None);
        assert_eq!(classify_line("models are fun"), None);
        assert_eq!(classify_line("Layer: units=1"), None);
    }

    #[test]
    fn test_keys_matched_by_name() {
        let spec = parse(
            r#"model M {
            layer: activation="sigmoid", units=3
            input: size=2
            }"#,
        )
        .unwrap();
        assert_eq!(spec.input_size(), 2);
        assert_eq!(
            spec.layers(),
            &[LayerSpec::new(3, ActivationKind::Sigmoid)]
        );
    }

    #[test]
    fn test_whitespace_and_comments_tolerated() {
        let spec = parse(
            "model   M{  // header\n\n# a note\ninput :size = 5\nlayer:units =7 ,activation= \"relu\" /* wide */\n}\n",
        )
        .unwrap();
        assert_eq!(spec.name(), "M");
        assert_eq!(spec.input_size(), 5);
        assert_eq!(spec.layers(), &[LayerSpec::new(7, ActivationKind::ReLU)]);
    }

    #[test]
    fn test_unrecognized_lines_skipped() {
        let spec = parse(
            r#"model M {
            optimizer: name="adam"
            input: size=2
            @@@ not even tokens @@@
            layer: units=1, activation="none"
            }"#,
        )
        .unwrap();
        assert_eq!(spec.layers().len(), 1);
        assert_eq!(spec.layers()[0].activation, ActivationKind::Identity);
    }

    #[test]
    fn test_unknown_activation_is_identity() {
        let spec = parse("model M {\ninput: size=2\nlayer: units=1, activation=\"tanh\"\n}").unwrap();
        assert_eq!(spec.layers()[0].activation, ActivationKind::Identity);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse(""), Err(ParseError::EmptyModelName));
    }

    #[test]
    fn test_missing_model() {
        assert_eq!(
            parse("input: size=4\nlayer: units=1, activation=\"relu\""),
            Err(ParseError::EmptyModelName)
        );
    }

    #[test]
    fn test_invalid_input_size() {
        assert_eq!(
            parse("model M {\ninput: size=0\nlayer: units=1, activation=\"relu\"\n}"),
            Err(ParseError::InvalidInputSize { size: 0 })
        );
        assert_eq!(
            parse("model M {\ninput: size=-3\nlayer: units=1, activation=\"relu\"\n}"),
            Err(ParseError::InvalidInputSize { size: -3 })
        );
        // missing input declaration
        assert_eq!(
            parse("model M {\nlayer: units=1, activation=\"relu\"\n}"),
            Err(ParseError::InvalidInputSize { size: 0 })
        );
    }

    #[test]
    fn test_no_layers() {
        assert_eq!(
            parse("model M {\ninput: size=4\n}"),
            Err(ParseError::NoLayers)
        );
    }

    #[test]
    fn test_invalid_units() {
        assert_eq!(
            parse("model M {\ninput: size=4\nlayer: units=3, activation=\"relu\"\nlayer: units=0, activation=\"relu\"\n}"),
            Err(ParseError::InvalidUnits { layer: 2, units: 0 })
        );
        assert_eq!(
            parse("model M {\ninput: size=4\nlayer: units=-1, activation=\"relu\"\n}"),
            Err(ParseError::InvalidUnits { layer: 1, units: -1 })
        );
    }

    #[test]
    fn test_validation_order() {
        // No model and no layers: the model name is reported first.
        assert_eq!(parse("input: size=0"), Err(ParseError::EmptyModelName));
        // Bad size and no layers: the size is reported first.
        assert_eq!(
            parse("model M {\ninput: size=0\n}"),
            Err(ParseError::InvalidInputSize { size: 0 })
        );
    }

    #[test]
    fn test_reserved_model_name() {
        let doc = "model class {\ninput: size=2\nlayer: units=1, activation=\"relu\"\n}";
        assert_eq!(
            parse(doc),
            Err(ParseError::ReservedModelName {
                name: "class".to_string(),
                target: Target::Cpp,
            })
        );
        // Checked with the model name, before the size.
        assert_eq!(
            parse("model tf {\ninput: size=0\n}"),
            Err(ParseError::ReservedModelName {
                name: "tf".to_string(),
                target: Target::JavaScript,
            })
        );
    }

    #[test]
    fn test_malformed_lines() {
        // missing brace
        assert_eq!(malformed_line(parse("model M\ninput: size=1")), 1);
        // missing name
        assert_eq!(malformed_line(parse("model {")), 1);
        // keyword as name
        assert_eq!(malformed_line(parse("model layer {")), 1);
        // trailing tokens
        assert_eq!(malformed_line(parse("model M { extra")), 1);
        // missing colon
        assert_eq!(malformed_line(parse("model M {\ninput size=4")), 2);
        // wrong key
        assert_eq!(malformed_line(parse("model M {\ninput: width=4")), 2);
        // extra key
        assert_eq!(
            malformed_line(parse("model M {\ninput: size=4\nlayer: units=2, activation=\"relu\", bias=1")),
            3
        );
        // duplicate key
        assert_eq!(
            malformed_line(parse("model M {\nlayer: units=2, units=3, activation=\"relu\"")),
            2
        );
        // missing key
        assert_eq!(malformed_line(parse("model M {\nlayer: units=2")), 2);
        // wrong value type
        assert_eq!(
            malformed_line(parse("model M {\nlayer: units=\"2\", activation=\"relu\"")),
            2
        );
        assert_eq!(
            malformed_line(parse("model M {\nlayer: units=2, activation=relu")),
            2
        );
        // dangling comma
        assert_eq!(
            malformed_line(parse("model M {\nlayer: units=2, activation=\"relu\",")),
            2
        );
        // untokenizable content on a recognized line
        assert_eq!(malformed_line(parse("model M {\ninput: size=4;")), 2);
        // junk after closing brace
        assert_eq!(malformed_line(parse("model M {\n} trailing")), 2);
    }

    #[test]
    fn test_duplicate_declarations() {
        assert_eq!(
            malformed_line(parse("model A {\nmodel B {\ninput: size=1")),
            2
        );
        assert_eq!(
            malformed_line(parse("model A {\ninput: size=1\ninput: size=2")),
            3
        );
    }

    #[test]
    fn test_error_messages() {
        let err = parse("model M {\ninput: width=4").unwrap_err();
        assert_eq!(err.to_string(), "Malformed line 2: unknown key `width`");

        let err = parse("model M {\ninput size=4").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed line 2: expected `:`, found `size`"
        );
    }
}
