//! Line-aware text writer used by the composition engine.

use super::Indent;

/// Accumulates rendered text and reapplies indentation per line.
///
/// Every non-empty line gets `level` indent units in front of it, so text
/// written while a nested block is open lands at the block's depth no matter
/// how it was authored. Blank lines are never indented.
///
/// # Example
///
/// ```
/// use tspoet_codegen::builder::{CodeWriter, Indent};
///
/// let mut w = CodeWriter::new(Indent::TWO_SPACES);
/// w.write("if (ready) {\n");
/// w.push_indent();
/// w.write("start();\nstop();");
/// w.push_dedent();
/// w.write("\n}");
///
/// assert_eq!(w.build(), "if (ready) {\n  start();\n  stop();\n}");
/// ```
#[derive(Debug, Clone)]
pub struct CodeWriter {
    level: usize,
    indent: Indent,
    buffer: String,
    at_line_start: bool,
}

impl CodeWriter {
    /// Create a writer at indent level zero.
    pub fn new(indent: Indent) -> Self {
        Self::at_level(indent, 0)
    }

    /// Create a writer starting at the given indent level.
    pub fn at_level(indent: Indent, level: usize) -> Self {
        Self {
            level,
            indent,
            buffer: String::new(),
            at_line_start: true,
        }
    }

    /// Write text, indenting every line that starts inside it.
    pub fn write(&mut self, text: &str) -> &mut Self {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.buffer.push('\n');
                self.at_line_start = true;
            }
            if line.is_empty() {
                continue;
            }
            if self.at_line_start {
                self.write_indent();
                self.at_line_start = false;
            }
            self.buffer.push_str(line);
        }
        self
    }

    /// Write a full line followed by a newline.
    pub fn line(&mut self, text: &str) -> &mut Self {
        self.write(text);
        self.write("\n")
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.level
    }

    /// Whether nothing has been written on the current line yet.
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume the writer and return the generated text.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.level {
            self.indent.write_to(&mut self.buffer);
        }
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new(Indent::default())
    }
}
