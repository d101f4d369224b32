use std::str::FromStr;

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::generator::Target;
use crate::parser::{ParseError, ParseResult};
use crate::tokenizer::{keyword::Keyword, token::parse_word};

/// Activation applied after a layer's affine transform.
///
/// Closed set: code generators match it exhaustively, so a new activation is
/// added here and in [`crate::generator::generate_with_config`] only.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
pub enum ActivationKind {
    /// Rectified Linear Unit: f(x) = max(0, x)
    #[strum(serialize = "relu")]
    #[serde(rename = "relu")]
    ReLU,
    /// Sigmoid: f(x) = 1 / (1 + exp(-x))
    #[strum(serialize = "sigmoid")]
    #[serde(rename = "sigmoid")]
    Sigmoid,
    /// No activation; the layer stays linear.
    #[strum(serialize = "none")]
    #[serde(rename = "none")]
    Identity,
}

impl ActivationKind {
    /// Maps a DSL activation string, exact and case-sensitive. Anything
    /// unrecognized is [`ActivationKind::Identity`].
    pub fn from_dsl(name: &str) -> Self {
        Self::from_str(name).unwrap_or(ActivationKind::Identity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerSpec {
    pub units: usize,
    pub activation: ActivationKind,
}

impl LayerSpec {
    pub fn new(units: usize, activation: ActivationKind) -> Self {
        Self { units, activation }
    }
}

/// A validated model description.
///
/// Fields are private: the only way to obtain one is [`ModelSpec::new`] (or
/// [`crate::parser::parse`]), which enforces a usable name (see
/// [`ModelSpec::check_name`]), a positive input size, and at least one layer
/// with positive units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSpec {
    name: String,
    input_size: usize,
    layers: Vec<LayerSpec>,
}

impl ModelSpec {
    pub fn new(
        name: impl Into<String>,
        input_size: usize,
        layers: Vec<LayerSpec>,
    ) -> ParseResult<Self> {
        let name = name.into();
        Self::check_name(&name)?;
        if input_size == 0 {
            return Err(ParseError::InvalidInputSize { size: 0 });
        }
        if layers.is_empty() {
            return Err(ParseError::NoLayers);
        }
        if let Some(index) = layers.iter().position(|l| l.units == 0) {
            return Err(ParseError::InvalidUnits {
                layer: index + 1,
                units: 0,
            });
        }

        Ok(Self {
            name,
            input_size,
            layers,
        })
    }

    /// A model name must be a DSL identifier that is not a keyword, so that it
    /// survives formatting and re-parsing, and must not clash with a reserved
    /// word or a generated binding in any built-in target.
    pub fn check_name(name: &str) -> ParseResult<()> {
        if name.is_empty() {
            return Err(ParseError::EmptyModelName);
        }

        let is_word = matches!(parse_word(name), Ok(("", _)));
        if !is_word || Keyword::from_str(name).is_ok() {
            return Err(ParseError::InvalidModelName {
                name: name.to_string(),
            });
        }

        if let Some(target) = Target::iter().find(|t| t.profile().is_reserved(name)) {
            return Err(ParseError::ReservedModelName {
                name: name.to_string(),
                target,
            });
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// `(rows, cols)` of each layer's weight matrix, in forward order.
    ///
    /// Columns chain from the previous layer's units, starting at the input
    /// size.
    pub fn layer_shapes(&self) -> Vec<(usize, usize)> {
        let mut cols = self.input_size;
        self.layers
            .iter()
            .map(|layer| {
                let shape = (layer.units, cols);
                cols = layer.units;
                shape
            })
            .collect()
    }
}
