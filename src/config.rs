use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{self, BufReader},
    num::NonZeroUsize,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::generator::{GeneratorConfig, Target, DEFAULT_INDENT_SPACES};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranspilerConfig {
    #[serde(default)]
    pub target: Target,

    /// Directory generated files are written to.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Zero is rejected when the file is read.
    #[serde(default = "default_indent_spaces")]
    pub indent_spaces: NonZeroUsize,
}

impl Default for TranspilerConfig {
    fn default() -> Self {
        Self {
            target: Target::default(),
            out_dir: default_out_dir(),
            indent_spaces: default_indent_spaces(),
        }
    }
}

impl TranspilerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "config not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            indent_spaces: self.indent_spaces,
        }
    }

    /// `<out_dir>/<model_name>.<ext>`
    pub fn output_path(&self, model_name: &str) -> PathBuf {
        self.out_dir
            .join(format!("{}.{}", model_name, self.target.file_extension()))
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_indent_spaces() -> NonZeroUsize {
    DEFAULT_INDENT_SPACES
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config: TranspilerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TranspilerConfig::default());
        assert_eq!(config.target, Target::Cpp);
        assert_eq!(config.indent_spaces.get(), 4);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "target": "python", "out_dir": "build", "indent_spaces": 2 }}"#
        )
        .unwrap();

        let config = TranspilerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.target, Target::Python);
        assert_eq!(config.out_dir, PathBuf::from("build"));
        assert_eq!(config.generator_config().indent_spaces.get(), 2);
        assert_eq!(
            config.output_path("TestModel"),
            PathBuf::from("build").join("TestModel.py")
        );
    }

    #[test]
    fn test_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "target": "fortran" }}"#).unwrap();
        assert!(matches!(
            TranspilerConfig::from_file(file.path()),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_zero_indent_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "target": "python", "indent_spaces": 0 }}"#).unwrap();
        assert!(matches!(
            TranspilerConfig::from_file(file.path()),
            Err(ConfigError::Json(_))
        ));
        assert!(TranspilerConfig::load_or_default(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = TranspilerConfig::load_or_default(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, TranspilerConfig::default());
    }
}
