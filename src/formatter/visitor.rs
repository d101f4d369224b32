use crate::ast::{LayerSpec, ModelSpec};
use crate::formatter::config::FormatterConfig;
use crate::generator::CodeWriter;

pub struct FormatterVisitor {
    config: FormatterConfig,
    writer: CodeWriter,
}

impl FormatterVisitor {
    pub fn new(config: FormatterConfig) -> Self {
        let writer = CodeWriter::new(config.indent_spaces);
        Self { config, writer }
    }

    pub fn format_model(mut self, spec: &ModelSpec) -> String {
        self.writer.line(format!("model {} {{", spec.name()));
        self.writer.indent();

        let size = self.assign("size", spec.input_size());
        self.writer.line(format!("input: {}", size));
        if self.config.block_spacing {
            self.writer.blank_line();
        }

        for layer in spec.layers() {
            self.format_layer(layer);
        }

        self.writer.dedent();
        self.writer.line("}");
        self.writer.finish()
    }

    fn format_layer(&mut self, layer: &LayerSpec) {
        let units = self.assign("units", layer.units);
        let activation = self.assign("activation", format!("\"{}\"", layer.activation));
        self.writer
            .line(format!("layer: {}, {}", units, activation));
    }

    fn assign(&self, key: &str, value: impl std::fmt::Display) -> String {
        if self.config.operator_spacing {
            format!("{} = {}", key, value)
        } else {
            format!("{}={}", key, value)
        }
    }
}
