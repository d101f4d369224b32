//! Built-in regression checks, run by the CLI when no input file is given.

use tracing::info;

use crate::ast::{ActivationKind, LayerSpec, ModelSpec};
use crate::error::{AilangError, AilangResult};
use crate::generator::Target;
use crate::parser::parse;

const SAMPLE: &str = r#"
    model TestModel {
        input: size=4
        layer: units=8, activation="relu"
        layer: units=2, activation="sigmoid"
    }
"#;

/// Runs every check and returns their names in order. Stops at the first
/// failure.
pub fn run() -> AilangResult<Vec<&'static str>> {
    let spec = check_parser()?;
    check_python(&spec)?;
    check_cpp(&spec)?;
    Ok(vec!["Parser", "Python transpilation", "C++ transpilation"])
}

fn ensure(condition: bool, message: &str) -> AilangResult<()> {
    if condition {
        Ok(())
    } else {
        Err(AilangError::self_check(message))
    }
}

fn check_parser() -> AilangResult<ModelSpec> {
    let spec = parse(SAMPLE)?;
    ensure(spec.name() == "TestModel", "model name")?;
    ensure(spec.input_size() == 4, "input size")?;
    ensure(
        spec.layers()
            == [
                LayerSpec::new(8, ActivationKind::ReLU),
                LayerSpec::new(2, ActivationKind::Sigmoid),
            ],
        "layers",
    )?;
    info!("parser check passed");
    Ok(spec)
}

fn check_python(spec: &ModelSpec) -> AilangResult<()> {
    let code = Target::Python.generate(spec);
    ensure(code.contains("class TestModel"), "python class declaration")?;
    ensure(code.contains("def forward"), "python forward method")?;
    ensure(
        code.contains("np.random.rand(8, 4)") && code.contains("np.random.rand(2, 8)"),
        "python weight shapes",
    )?;
    info!("python check passed");
    Ok(())
}

fn check_cpp(spec: &ModelSpec) -> AilangResult<()> {
    let code = Target::Cpp.generate(spec);
    ensure(code.starts_with("#include <Eigen/Dense>"), "c++ header")?;
    ensure(code.contains("class TestModel {"), "c++ class declaration")?;
    ensure(
        code.contains("Eigen::MatrixXd forward(const Eigen::MatrixXd& input)"),
        "c++ forward method",
    )?;
    info!("c++ check passed");
    Ok(())
}
