//! # Code Generation
//!
//! Emits forward-pass source code for a [`ModelSpec`].
//!
//! [`generate_with_config`] owns the algorithm shared by every target: it
//! walks the layers in order, chains weight shapes from the input size, and
//! maps each [`ActivationKind`]. A [`TargetProfile`] only supplies the text
//! of each step. Generation cannot fail on a validated spec.

pub mod cpp;
pub mod javascript;
pub mod python;
pub mod writer;

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ast::{ActivationKind, ModelSpec};

pub use cpp::CppProfile;
pub use javascript::JavaScriptProfile;
pub use python::PythonProfile;
pub use writer::CodeWriter;

/// Parameters of one layer as seen by an emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerParams {
    /// 1-based position in the forward pass.
    pub index: usize,
    pub rows: usize,
    pub cols: usize,
    pub activation: ActivationKind,
}

impl LayerParams {
    pub fn weight(&self) -> String {
        format!("W{}", self.index)
    }

    pub fn bias(&self) -> String {
        format!("b{}", self.index)
    }
}

/// Target-language text for each step of the shared algorithm.
///
/// Hooks are called in this order: `prologue`, `open_class`,
/// `open_constructor`, `init_layer` per layer, `close_constructor`,
/// `open_forward`, then `affine` and at most one of `relu`/`sigmoid` per
/// layer, `close_forward`, `close_class`. Hooks manage their own
/// indentation and must leave it balanced.
pub trait TargetProfile {
    fn file_extension(&self) -> &'static str;
    /// Whether `name` cannot be emitted as the class name: a target keyword
    /// or a binding the generated code relies on.
    fn is_reserved(&self, name: &str) -> bool;
    fn prologue(&self, w: &mut CodeWriter);
    fn open_class(&self, w: &mut CodeWriter, name: &str);
    fn open_constructor(&self, w: &mut CodeWriter, name: &str);
    fn init_layer(&self, w: &mut CodeWriter, layer: &LayerParams);
    fn close_constructor(&self, w: &mut CodeWriter);
    fn open_forward(&self, w: &mut CodeWriter);
    /// `x = W * x + b`
    fn affine(&self, w: &mut CodeWriter, layer: &LayerParams);
    /// Elementwise `max(x, 0)`.
    fn relu(&self, w: &mut CodeWriter);
    /// Elementwise `1 / (1 + exp(-x))`.
    fn sigmoid(&self, w: &mut CodeWriter);
    fn close_forward(&self, w: &mut CodeWriter);
    fn close_class(&self, w: &mut CodeWriter, name: &str, layers: &[LayerParams]);
}

pub const DEFAULT_INDENT_SPACES: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Nonzero: Python bodies are delimited by indentation alone.
    pub indent_spaces: NonZeroUsize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent_spaces: DEFAULT_INDENT_SPACES,
        }
    }
}

/// Built-in targets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// C++ with Eigen
    #[default]
    #[strum(to_string = "cpp", serialize = "c++")]
    Cpp,
    /// Python with NumPy
    #[strum(to_string = "python", serialize = "py")]
    Python,
    /// JavaScript with TensorFlow.js
    #[strum(to_string = "javascript", serialize = "js")]
    JavaScript,
}

impl Target {
    pub fn profile(self) -> &'static dyn TargetProfile {
        match self {
            Target::Cpp => &CppProfile,
            Target::Python => &PythonProfile,
            Target::JavaScript => &JavaScriptProfile,
        }
    }

    pub fn file_extension(self) -> &'static str {
        self.profile().file_extension()
    }

    pub fn generate(self, spec: &ModelSpec) -> String {
        generate(spec, self.profile())
    }
}

pub fn layer_params(spec: &ModelSpec) -> Vec<LayerParams> {
    spec.layers()
        .iter()
        .zip(spec.layer_shapes())
        .enumerate()
        .map(|(i, (layer, (rows, cols)))| LayerParams {
            index: i + 1,
            rows,
            cols,
            activation: layer.activation,
        })
        .collect()
}

pub fn generate(spec: &ModelSpec, profile: &dyn TargetProfile) -> String {
    generate_with_config(spec, profile, &GeneratorConfig::default())
}

pub fn generate_with_config(
    spec: &ModelSpec,
    profile: &dyn TargetProfile,
    config: &GeneratorConfig,
) -> String {
    debug!(
        model = spec.name(),
        extension = profile.file_extension(),
        layers = spec.layers().len(),
        "generating model"
    );

    let layers = layer_params(spec);
    let mut w = CodeWriter::new(config.indent_spaces.get());

    profile.prologue(&mut w);
    profile.open_class(&mut w, spec.name());

    profile.open_constructor(&mut w, spec.name());
    for layer in &layers {
        profile.init_layer(&mut w, layer);
    }
    profile.close_constructor(&mut w);

    profile.open_forward(&mut w);
    for layer in &layers {
        profile.affine(&mut w, layer);
        match layer.activation {
            ActivationKind::ReLU => profile.relu(&mut w),
            ActivationKind::Sigmoid => profile.sigmoid(&mut w),
            ActivationKind::Identity => {}
        }
    }
    profile.close_forward(&mut w);

    profile.close_class(&mut w, spec.name(), &layers);
    w.finish()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;
    use crate::ast::LayerSpec;

    fn three_layer() -> ModelSpec {
        ModelSpec::new(
            "Net",
            5,
            vec![
                LayerSpec::new(16, ActivationKind::ReLU),
                LayerSpec::new(4, ActivationKind::Identity),
                LayerSpec::new(1, ActivationKind::Sigmoid),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_layer_params() {
        let params = layer_params(&three_layer());
        assert_eq!(params.len(), 3);
        assert_eq!((params[0].index, params[0].rows, params[0].cols), (1, 16, 5));
        assert_eq!((params[1].index, params[1].rows, params[1].cols), (2, 4, 16));
        assert_eq!((params[2].index, params[2].rows, params[2].cols), (3, 1, 4));
        assert_eq!(params[2].weight(), "W3");
        assert_eq!(params[2].bias(), "b3");
    }

    #[test]
    fn test_target_names() {
        assert_eq!(Target::from_str("cpp").unwrap(), Target::Cpp);
        assert_eq!(Target::from_str("c++").unwrap(), Target::Cpp);
        assert_eq!(Target::from_str("py").unwrap(), Target::Python);
        assert_eq!(Target::from_str("js").unwrap(), Target::JavaScript);
        assert!(Target::from_str("rust").is_err());
        for target in Target::iter() {
            assert_eq!(Target::from_str(&target.to_string()).unwrap(), target);
        }
    }

    #[test]
    fn test_file_extensions() {
        assert_eq!(Target::Cpp.file_extension(), "cpp");
        assert_eq!(Target::Python.file_extension(), "py");
        assert_eq!(Target::JavaScript.file_extension(), "js");
    }

    #[test]
    fn test_generation_is_deterministic() {
        let spec = three_layer();
        for target in Target::iter() {
            assert_eq!(target.generate(&spec), target.generate(&spec));
        }
    }

    #[test]
    fn test_indent_config() {
        let code = generate_with_config(
            &three_layer(),
            &PythonProfile,
            &GeneratorConfig {
                indent_spaces: NonZeroUsize::new(2).unwrap(),
            },
        );
        assert!(code.contains("\n  def __init__(self):\n    self.W1"));
    }

    #[test]
    fn test_target_serde() {
        let target: Target = serde_json::from_str("\"javascript\"").unwrap();
        assert_eq!(target, Target::JavaScript);
        assert_eq!(serde_json::to_string(&Target::Cpp).unwrap(), "\"cpp\"");
    }
}
