use super::{CodeWriter, LayerParams, TargetProfile};

/// NumPy class with weights stored on the instance by `__init__`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonProfile;

// `keyword.kwlist` as of Python 3.12.
const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from",
    "global", "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass",
    "raise", "return", "try", "while", "with", "yield",
];

impl TargetProfile for PythonProfile {
    fn file_extension(&self) -> &'static str {
        "py"
    }

    fn is_reserved(&self, name: &str) -> bool {
        // A module-level class named `np` would rebind the NumPy import.
        KEYWORDS.contains(&name) || name == "np"
    }

    fn prologue(&self, w: &mut CodeWriter) {
        w.line("import numpy as np");
        w.blank_line();
    }

    fn open_class(&self, w: &mut CodeWriter, name: &str) {
        w.line(format!("class {}:", name));
        w.indent();
    }

    fn open_constructor(&self, w: &mut CodeWriter, _name: &str) {
        w.line("def __init__(self):");
        w.indent();
    }

    fn init_layer(&self, w: &mut CodeWriter, layer: &LayerParams) {
        w.line(format!(
            "self.{} = np.random.rand({}, {})",
            layer.weight(),
            layer.rows,
            layer.cols
        ));
        w.line(format!("self.{} = np.random.rand({})", layer.bias(), layer.rows));
    }

    fn close_constructor(&self, w: &mut CodeWriter) {
        w.dedent();
        w.blank_line();
    }

    fn open_forward(&self, w: &mut CodeWriter) {
        w.line("def forward(self, x):");
        w.indent();
        w.line("x = np.array(x)");
    }

    fn affine(&self, w: &mut CodeWriter, layer: &LayerParams) {
        w.line(format!(
            "x = np.dot(self.{}, x) + self.{}",
            layer.weight(),
            layer.bias()
        ));
    }

    fn relu(&self, w: &mut CodeWriter) {
        w.line("x = np.maximum(0, x)");
    }

    fn sigmoid(&self, w: &mut CodeWriter) {
        w.line("x = 1 / (1 + np.exp(-x))");
    }

    fn close_forward(&self, w: &mut CodeWriter) {
        w.line("return x");
        w.dedent();
    }

    fn close_class(&self, w: &mut CodeWriter, _name: &str, _layers: &[LayerParams]) {
        w.dedent();
    }
}
