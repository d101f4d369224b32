#[derive(Debug, Clone)]
pub struct FormatterConfig {
    pub indent_spaces: usize,
    /// `size = 4` instead of `size=4`.
    pub operator_spacing: bool,
    /// Blank line between the input declaration and the layers.
    pub block_spacing: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            indent_spaces: 4,
            operator_spacing: false,
            block_spacing: false,
        }
    }
}
