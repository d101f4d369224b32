//! # AILang: neural-network description to source code
//!
//! AILang reads a small declarative description of a feed-forward network
//! and emits source code that implements its forward pass in a numerical
//! runtime.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source Text → Tokenizer → Parser → ModelSpec → Generator(Target) → Source Code
//! ```
//!
//! * [`tokenizer`]: lexical analysis of one DSL line into spanned tokens
//! * [`parser`]: line classification, declaration grammars and validation
//! * [`ast`]: the validated [`ModelSpec`] and its layers
//! * [`generator`]: the shared forward-pass emitter and one
//!   [`TargetProfile`](generator::TargetProfile) per output language
//! * [`formatter`]: canonical DSL text for a [`ModelSpec`]
//!
//! Reading and writing files is left to the caller; the `ailang` binary is
//! one such caller.
//!
//! ```rust
//! use ailang::{transpile, Target};
//!
//! let source = r#"
//! model TestModel {
//!     input: size=4
//!     layer: units=8, activation="relu"
//!     layer: units=2, activation="sigmoid"
//! }
//! "#;
//! let code = transpile(source, Target::Python).unwrap();
//! assert!(code.contains("class TestModel:"));
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod formatter;
pub mod generator;
pub mod parser;
pub mod selfcheck;
pub mod tokenizer;

// Re-exports
pub use ast::*;
pub use error::*;
pub use generator::{generate, generate_with_config, GeneratorConfig, Target, TargetProfile};
pub use parser::{parse, ParseError, ParseResult};

/// Parses `source` and generates code for `target` with default settings.
pub fn transpile(source: &str, target: Target) -> ParseResult<String> {
    let spec = parse(source)?;
    Ok(target.generate(&spec))
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    #[ctor::ctor]
    fn init_tests() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    }

    #[test]
    fn test_transpile_propagates_parse_error() {
        assert_eq!(
            super::transpile("", super::Target::Cpp),
            Err(super::ParseError::EmptyModelName)
        );
    }
}
