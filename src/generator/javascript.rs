use super::{CodeWriter, LayerParams, TargetProfile};

/// TensorFlow.js class exported as a CommonJS module.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScriptProfile;

// Reserved words, including strict-mode ones, plus `arguments` and `eval`.
const RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "eval", "export", "extends",
    "false", "finally", "for", "function", "if", "implements", "import", "in",
    "instanceof", "interface", "let", "new", "null", "package", "private", "protected",
    "public", "return", "static", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield",
];

impl TargetProfile for JavaScriptProfile {
    fn file_extension(&self) -> &'static str {
        "js"
    }

    fn is_reserved(&self, name: &str) -> bool {
        RESERVED.contains(&name) || ["tf", "require", "module", "exports"].contains(&name)
    }

    fn prologue(&self, w: &mut CodeWriter) {
        w.line("const tf = require('@tensorflow/tfjs');");
        w.blank_line();
    }

    fn open_class(&self, w: &mut CodeWriter, name: &str) {
        w.line(format!("class {} {{", name));
        w.indent();
    }

    fn open_constructor(&self, w: &mut CodeWriter, _name: &str) {
        w.line("constructor() {");
        w.indent();
    }

    fn init_layer(&self, w: &mut CodeWriter, layer: &LayerParams) {
        w.line(format!(
            "this.{} = tf.randomUniform([{}, {}]);",
            layer.weight(),
            layer.rows,
            layer.cols
        ));
        w.line(format!(
            "this.{} = tf.randomUniform([{}]);",
            layer.bias(),
            layer.rows
        ));
    }

    fn close_constructor(&self, w: &mut CodeWriter) {
        w.dedent();
        w.line("}");
        w.blank_line();
    }

    fn open_forward(&self, w: &mut CodeWriter) {
        w.line("forward(input) {");
        w.indent();
        w.line("let x = tf.tensor(input);");
    }

    fn affine(&self, w: &mut CodeWriter, layer: &LayerParams) {
        w.line(format!(
            "x = tf.dot(this.{}, x).add(this.{});",
            layer.weight(),
            layer.bias()
        ));
    }

    fn relu(&self, w: &mut CodeWriter) {
        w.line("x = tf.relu(x);");
    }

    fn sigmoid(&self, w: &mut CodeWriter) {
        w.line("x = tf.sigmoid(x);");
    }

    fn close_forward(&self, w: &mut CodeWriter) {
        w.line("return x;");
        w.dedent();
        w.line("}");
    }

    fn close_class(&self, w: &mut CodeWriter, name: &str, _layers: &[LayerParams]) {
        w.dedent();
        w.line("}");
        w.blank_line();
        w.line(format!("module.exports = {{ {} }};", name));
    }
}
