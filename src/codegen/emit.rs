//! Objective-C statement generation from the object model

use tracing::debug;

use crate::model::{Node, ObjectModel};

use super::constraints::{resolve, ConstraintBlock};
use super::EmitConfig;

/// Build the layout body incrementally
///
/// Statements are collected per section and joined in a fixed order:
/// declarations, subview attachments, constraint blocks.
pub struct ObjcBuilder {
    config: EmitConfig,
    declarations: Vec<String>,
    attachments: Vec<String>,
    constraints: Vec<String>,
}

impl ObjcBuilder {
    /// Create a new builder
    pub fn new(config: EmitConfig) -> Self {
        Self {
            config,
            declarations: vec![],
            attachments: vec![],
            constraints: vec![],
        }
    }

    fn line(&self, level: usize, statement: &str) -> String {
        format!("{}{}\n", self.config.indent(level), statement)
    }

    /// Add a node's declaration, property assignments and method calls
    pub fn add_node(&mut self, node: &Node) {
        let mut group = String::new();
        let name = &node.instance_name;

        if !node.is_root() {
            let declaration = if node.is_property() {
                format!("{} = {};", name, node.constructor)
            } else {
                format!("{} *{} = {};", node.class, name, node.constructor)
            };
            group.push_str(&self.line(1, &declaration));
        }
        for (property, value) in &node.properties {
            group.push_str(&self.line(1, &format!("{}.{} = {};", name, property, value)));
        }
        for message in node.methods.values() {
            group.push_str(&self.line(1, &format!("[{} {}];", name, message)));
        }

        if group.is_empty() {
            return;
        }
        if self.config.separate_nodes {
            group.push('\n');
        }
        self.declarations.push(group);
    }

    /// Add `[parent addSubview:child];`
    pub fn add_attachment(&mut self, parent: &Node, child: &Node) {
        let statement = format!(
            "[{} {}{}];",
            parent.scope_name(),
            parent.attach_selector(),
            child.instance_name
        );
        let line = self.line(1, &statement);
        self.attachments.push(line);
    }

    /// Add one `mas_makeConstraints:` block
    pub fn add_constraint_block(&mut self, block: &ConstraintBlock) {
        let mut text = self.line(
            1,
            &format!(
                "[{} mas_makeConstraints:^(MASConstraintMaker *make) {{",
                block.target
            ),
        );
        for expression in &block.expressions {
            text.push_str(&self.line(2, &format!("{};", expression)));
        }
        text.push_str(&self.line(1, "}];"));
        text.push('\n');
        self.constraints.push(text);
    }

    /// Join all sections into the final body
    pub fn build(self) -> String {
        let mut out: String = self.declarations.concat();
        if !self.attachments.is_empty() {
            out.push_str(&self.attachments.concat());
            out.push('\n');
        }
        out.push_str(&self.constraints.concat());
        out
    }
}

/// Render the layout body for `model`
///
/// Nodes are declared in reverse traversal order, so every child exists
/// before its parent's statements run; attachments and constraint blocks
/// follow in hierarchy order.
pub fn render_layout(model: &ObjectModel, config: &EmitConfig) -> String {
    let mut builder = ObjcBuilder::new(config.clone());

    for node in model.nodes.values().rev() {
        builder.add_node(node);
    }

    for edge in model.edges() {
        let Some(parent) = model.nodes.get(&edge.parent) else {
            continue;
        };
        for child in edge.children.iter().filter_map(|id| model.nodes.get(id)) {
            builder.add_attachment(parent, child);
        }
    }

    let blocks = resolve(model);
    debug!(blocks = blocks.len(), "rendering constraint blocks");
    for block in &blocks {
        builder.add_constraint_block(block);
    }

    builder.build()
}

/// Render `@property` declarations for labeled nodes, in traversal order
pub fn render_properties(model: &ObjectModel) -> String {
    model
        .nodes
        .values()
        .filter_map(|node| {
            node.property_name()
                .map(|name| format!("@property (nonatomic, strong) {} *{};\n", node.class, name))
        })
        .collect()
}
