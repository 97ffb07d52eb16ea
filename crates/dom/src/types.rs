//! Core type definitions for the document arena
//!
//! Key design principles:
//! 1. Use u32 for indices (4 bytes vs 8 bytes pointer)
//! 2. Use SmallVec for small arrays (avoid heap allocation)
//! 3. Keep attribute insertion order (serialization depends on it)

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Node identifier (index into arena)
pub type NodeId = u32;

/// Node type matching DOM specification numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    DocumentFragment = 11,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            3 => Some(NodeType::Text),
            11 => Some(NodeType::DocumentFragment),
            _ => None,
        }
    }

    /// Name used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Element => "element",
            NodeType::Text => "text",
            NodeType::DocumentFragment => "document fragment",
        }
    }

    /// Whether nodes of this type may hold children
    pub fn is_container(&self) -> bool {
        matches!(self, NodeType::Element | NodeType::DocumentFragment)
    }
}

/// A single name/value attribute pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Attribute list in insertion order. Most elements carry few attributes.
pub type Attributes = SmallVec<[Attribute; 4]>;

/// The document tree node structure
///
/// Design philosophy:
/// - Small fixed-size fields first (better packing)
/// - Use indices instead of pointers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub node_id: NodeId,
    pub node_type: NodeType,

    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>, // Most nodes have <4 children

    /// Tag name for elements, `#text` / `#document-fragment` otherwise
    pub node_name: String,
    /// Character data for text nodes, empty otherwise
    pub node_value: String,
    pub attributes: Attributes,
}

impl DomNode {
    /// Create a new detached node
    pub fn new(node_id: NodeId, node_type: NodeType, node_name: String) -> Self {
        Self {
            node_id,
            node_type,
            parent_id: None,
            children_ids: SmallVec::new(),
            node_name,
            node_value: String::new(),
            attributes: SmallVec::new(),
        }
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        if self.node_type == NodeType::Element {
            Some(&self.node_name)
        } else {
            None
        }
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if node is text
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set attribute value, keeping the position of an existing attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Class tokens from the `class` attribute, in order
    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }
}

/// Elements that never have content and serialize without a closing tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Check whether a tag name is a void element (ASCII case-insensitive)
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_keeps_position() {
        let mut node = DomNode::new(0, NodeType::Element, "div".to_string());
        node.set_attr("id", "a");
        node.set_attr("title", "t");
        node.set_attr("id", "b");

        let names: Vec<&str> = node.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["id", "title"]);
        assert_eq!(node.attr("id"), Some("b"));
    }

    #[test]
    fn test_class_list_splits_whitespace() {
        let mut node = DomNode::new(0, NodeType::Element, "div".to_string());
        node.set_attr("class", " one  two ");
        assert_eq!(node.class_list().collect::<Vec<_>>(), vec!["one", "two"]);
    }

    #[test]
    fn test_node_type_roundtrip() {
        assert_eq!(NodeType::from_u8(11), Some(NodeType::DocumentFragment));
        assert_eq!(NodeType::from_u8(9), None);
        assert!(is_void_element("BR"));
        assert!(!is_void_element("div"));
    }
}
