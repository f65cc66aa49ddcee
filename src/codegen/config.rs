//! Configuration for code emission

/// Configuration options for the generated layout body
#[derive(Debug, Clone)]
pub struct EmitConfig {
    /// Spaces per indentation level
    pub indent_width: usize,

    /// Emit a blank line after each node's declaration group
    pub separate_nodes: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            separate_nodes: true,
        }
    }
}

impl EmitConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set whether node groups are separated by blank lines
    pub fn with_separate_nodes(mut self, separate: bool) -> Self {
        self.separate_nodes = separate;
        self
    }

    /// Indentation string for the given nesting level
    pub fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_width * level)
    }
}
