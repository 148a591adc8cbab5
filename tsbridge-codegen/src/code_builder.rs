//! Code builder utility for generating properly indented declaration text.

use crate::Indent;

/// Fluent API for building indented text.
///
/// # Example
///
/// ```
/// use tsbridge_codegen::{CodeBuilder, Indent};
///
/// let code = CodeBuilder::new(Indent::Spaces(2))
///     .line("export interface Point {")
///     .indent()
///     .line("x: number;")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "export interface Point {\n  x: number;\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Add a line with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the generated text.
    pub fn build(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let code = CodeBuilder::new(Indent::Tab).line("type Id = string;").build();
        assert_eq!(code, "type Id = string;\n");
    }

    #[test]
    fn test_tab_indentation() {
        let code = CodeBuilder::new(Indent::Tab)
            .line("export enum Color {")
            .indent()
            .line("Red = 1,")
            .dedent()
            .line("}")
            .build();

        assert_eq!(code, "export enum Color {\n\tRed = 1,\n}\n");
    }

    #[test]
    fn test_each() {
        let code = CodeBuilder::new(Indent::Spaces(2))
            .line("export enum Color {")
            .indent()
            .each(["Red", "Green", "Blue"], |b, color| {
                b.line(&format!("{color},"))
            })
            .dedent()
            .line("}")
            .build();

        assert_eq!(
            code,
            "export enum Color {\n  Red,\n  Green,\n  Blue,\n}\n"
        );
    }

    #[test]
    fn test_dedent_at_zero_is_safe() {
        let code = CodeBuilder::new(Indent::Tab).dedent().line("x").build();
        assert_eq!(code, "x\n");
    }
}
