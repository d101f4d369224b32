//! Canonical DSL text for a [`ModelSpec`](crate::ast::ModelSpec).
//!
//! Parsing the formatted text yields the same model.

pub mod config;
pub mod visitor;

pub use config::FormatterConfig;
pub use visitor::FormatterVisitor;

use crate::ast::ModelSpec;

pub fn format_model(spec: &ModelSpec, config: &FormatterConfig) -> String {
    FormatterVisitor::new(config.clone()).format_model(spec)
}
