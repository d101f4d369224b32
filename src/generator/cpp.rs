use super::{CodeWriter, LayerParams, TargetProfile};

/// Eigen class. The zero-argument constructor fills member matrices with
/// `Random`, and `forward` maps an input matrix to an output matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct CppProfile;

// C++20 keywords and alternative operator spellings.
const KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool",
    "break", "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class",
    "compl", "concept", "const", "consteval", "constexpr", "constinit", "const_cast",
    "continue", "co_await", "co_return", "co_yield", "decltype", "default", "delete",
    "do", "double", "dynamic_cast", "else", "enum", "explicit", "export", "extern",
    "false", "float", "for", "friend", "goto", "if", "inline", "int", "long",
    "mutable", "namespace", "new", "noexcept", "not", "not_eq", "nullptr", "operator",
    "or", "or_eq", "private", "protected", "public", "register", "reinterpret_cast",
    "requires", "return", "short", "signed", "sizeof", "static", "static_assert",
    "static_cast", "struct", "switch", "template", "this", "thread_local", "throw",
    "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

// A class may not declare a member with its own name, and the members are
// `W<i>` and `b<i>`.
fn is_layer_member(name: &str) -> bool {
    name.strip_prefix(|c: char| c == 'W' || c == 'b')
        .is_some_and(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
}

impl TargetProfile for CppProfile {
    fn file_extension(&self) -> &'static str {
        "cpp"
    }

    fn is_reserved(&self, name: &str) -> bool {
        KEYWORDS.contains(&name) || name == "Eigen" || name == "forward" || is_layer_member(name)
    }

    fn prologue(&self, w: &mut CodeWriter) {
        w.line("#include <Eigen/Dense>");
        w.blank_line();
    }

    fn open_class(&self, w: &mut CodeWriter, name: &str) {
        w.line(format!("class {} {{", name));
        w.line("public:");
        w.indent();
    }

    fn open_constructor(&self, w: &mut CodeWriter, name: &str) {
        w.line(format!("{}() {{", name));
        w.indent();
    }

    fn init_layer(&self, w: &mut CodeWriter, layer: &LayerParams) {
        w.line(format!(
            "{} = Eigen::MatrixXd::Random({}, {});",
            layer.weight(),
            layer.rows,
            layer.cols
        ));
        w.line(format!(
            "{} = Eigen::VectorXd::Random({});",
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
        w.line("Eigen::MatrixXd forward(const Eigen::MatrixXd& input) {");
        w.indent();
        w.line("Eigen::MatrixXd x = input;");
    }

    fn affine(&self, w: &mut CodeWriter, layer: &LayerParams) {
        w.line(format!(
            "x = ({} * x).colwise() + {};",
            layer.weight(),
            layer.bias()
        ));
    }

    fn relu(&self, w: &mut CodeWriter) {
        w.line("x = x.cwiseMax(0.0);");
    }

    fn sigmoid(&self, w: &mut CodeWriter) {
        w.line("x = (1.0 / (1.0 + (-x.array()).exp())).matrix();");
    }

    fn close_forward(&self, w: &mut CodeWriter) {
        w.line("return x;");
        w.dedent();
        w.line("}");
    }

    fn close_class(&self, w: &mut CodeWriter, _name: &str, layers: &[LayerParams]) {
        w.blank_line();
        w.dedent();
        w.line("private:");
        w.indent();
        for layer in layers {
            w.line(format!("Eigen::MatrixXd {};", layer.weight()));
            w.line(format!("Eigen::VectorXd {};", layer.bias()));
        }
        w.dedent();
        w.line("};");
    }
}
