/// Line-based text builder with block indentation.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    indent_spaces: usize,
    indent_level: usize,
    output: String,
}

impl CodeWriter {
    pub fn new(indent_spaces: usize) -> Self {
        Self {
            indent_spaces,
            indent_level: 0,
            output: String::new(),
        }
    }

    /// Writes `text` at the current indentation and ends the line.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.output
                .push_str(&" ".repeat(self.indent_level * self.indent_spaces));
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    pub fn blank_line(&mut self) {
        self.output.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_indentation() {
        let mut w = CodeWriter::new(2);
        w.line("a {");
        w.indent();
        w.line("b");
        w.blank_line();
        w.line("");
        w.dedent();
        w.dedent();
        w.line("}");
        assert_eq!(w.finish(), "a {\n  b\n\n\n}\n");
    }
}
