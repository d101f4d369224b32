use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::parser::ParseError;

#[derive(Error, Debug)]
pub enum AilangError {
    #[error("Could not open file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not write file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Self check failed: {0}")]
    SelfCheck(String),
}

pub type AilangResult<T> = Result<T, AilangError>;

impl AilangError {
    pub fn self_check<S: Into<String>>(message: S) -> Self {
        AilangError::SelfCheck(message.into())
    }
}
