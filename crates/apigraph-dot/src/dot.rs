//! DOT format utilities for graph rendering.

use std::fmt::Write;

/// Sanitize a string to be a valid DOT identifier.
/// Replaces any non-alphanumeric character with underscore.
pub fn sanitize_id(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Escape special characters for DOT labels.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Write indentation to output.
pub fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// A DOT graph builder for constructing valid DOT output.
pub struct DotBuilder {
    output: String,
    indent: usize,
}

impl DotBuilder {
    /// Create a new DOT graph. The name is sanitized; an empty name becomes `G`
    /// and a leading digit gets a `_` prefix.
    pub fn new(name: &str) -> Self {
        let name = match name.chars().next() {
            None => "G".to_string(),
            Some(c) if c.is_ascii_digit() => format!("_{}", sanitize_id(name)),
            Some(_) => sanitize_id(name),
        };
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {name} {{");
        Self { output, indent: 1 }
    }

    /// Add a graph attribute.
    pub fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{}=\"{}\";", key, escape_label(value));
        self
    }

    /// Add a node style default.
    pub fn node_style(&mut self, attrs: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "node [{attrs}];");
        self
    }

    /// Add a simple node with just an ID and label.
    pub fn node(&mut self, id: &str, label: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{}[label=\"{}\"];", id, escape_label(label));
        self
    }

    pub fn edge(&mut self, from: &str, to: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{from} -> {to};");
        self
    }

    /// Start a subgraph cluster labelled `label`.
    pub fn start_cluster(&mut self, id: &str, label: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "subgraph cluster_{} {{", sanitize_id(id));
        self.indent += 1;
        self.attr("label", label)
    }

    /// End the current subgraph cluster.
    pub fn end_cluster(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        write_indent(&mut self.output, self.indent);
        self.output.push_str("}\n");
        self
    }

    /// Finish building and return the DOT string.
    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}
