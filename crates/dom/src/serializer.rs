//! DOM Serializer - Convert a node subtree to markup
//!
//! Elements emit an opening tag with attributes in insertion order, their
//! serialized children, then a closing tag. Fragments emit only their
//! children. Void elements have no closing tag.

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::*;
use crate::utils::{escape_attribute, escape_text};

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// Emit void elements (`<br>`, `<img>`, ...) without a closing tag
    pub self_close_void: bool,
    /// Indent nested elements by this many spaces, one node per line
    pub indent: Option<usize>,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            self_close_void: true,
            indent: None,
        }
    }
}

/// Markup serializer
pub struct DomSerializer {
    config: SerializerConfig,
}

impl DomSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Serialize a node and its subtree
    pub fn serialize(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let mut output = String::with_capacity(256);
        self.serialize_node(arena, node_id, 0, &mut output)?;

        if self.config.indent.is_some() && output.ends_with('\n') {
            output.pop();
        }
        Ok(output)
    }

    /// Serialize a single node recursively
    fn serialize_node(
        &self,
        arena: &DomArena,
        node_id: NodeId,
        depth: usize,
        output: &mut String,
    ) -> Result<()> {
        let node = arena.get(node_id)?;

        match node.node_type {
            NodeType::Element => {
                self.push_indent(depth, output);
                output.push('<');
                output.push_str(&node.node_name);

                for attr in &node.attributes {
                    output.push(' ');
                    output.push_str(&attr.name);
                    output.push_str("=\"");
                    escape_attribute(&attr.value, output);
                    output.push('"');
                }
                output.push('>');

                if self.config.self_close_void && is_void_element(&node.node_name) {
                    self.push_newline(output);
                    return Ok(());
                }

                let inline = self.config.indent.is_none()
                    || node
                        .children_ids
                        .iter()
                        .all(|&id| arena.get(id).is_ok_and(DomNode::is_text));

                if inline {
                    for &child_id in &node.children_ids {
                        self.serialize_inline(arena, child_id, output)?;
                    }
                } else {
                    self.push_newline(output);
                    for &child_id in &node.children_ids {
                        self.serialize_node(arena, child_id, depth + 1, output)?;
                    }
                    self.push_indent(depth, output);
                }

                output.push_str("</");
                output.push_str(&node.node_name);
                output.push('>');
                self.push_newline(output);
            }
            NodeType::Text => {
                self.push_indent(depth, output);
                escape_text(&node.node_value, output);
                self.push_newline(output);
            }
            NodeType::DocumentFragment => {
                for &child_id in &node.children_ids {
                    self.serialize_node(arena, child_id, depth, output)?;
                }
            }
        }

        Ok(())
    }

    /// Text children of an element are kept on the element's line
    fn serialize_inline(
        &self,
        arena: &DomArena,
        node_id: NodeId,
        output: &mut String,
    ) -> Result<()> {
        let node = arena.get(node_id)?;
        if node.is_text() {
            escape_text(&node.node_value, output);
            Ok(())
        } else {
            self.serialize_node(arena, node_id, 0, output)
        }
    }

    fn push_indent(&self, depth: usize, output: &mut String) {
        if let Some(width) = self.config.indent {
            output.push_str(&" ".repeat(width * depth));
        }
    }

    fn push_newline(&self, output: &mut String) {
        if self.config.indent.is_some() {
            output.push('\n');
        }
    }
}

impl Default for DomSerializer {
    fn default() -> Self {
        Self::new()
    }
}
