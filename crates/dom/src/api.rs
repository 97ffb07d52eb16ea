//! Node API - the capability set a document must provide to be built into
//!
//! Builders are generic over this trait and never touch storage directly.
//! `DomArena` is the in-crate implementation.

use crate::arena::DomArena;
use crate::error::Result;
use crate::serializer::DomSerializer;
use crate::types::NodeId;

/// Document capabilities consumed by element builders
pub trait NodeApi {
    /// Handle to a node owned by the document
    type Node: Copy + Eq + std::fmt::Debug;

    fn create_element(&mut self, tag: &str) -> Self::Node;
    fn create_text_node(&mut self, text: &str) -> Self::Node;
    fn create_fragment(&mut self) -> Self::Node;

    /// Whether the handle refers to a node of this document
    fn contains(&self, node: Self::Node) -> bool;
    fn is_element(&self, node: Self::Node) -> bool;
    /// Whether `ancestor` is `node` itself or one of its ancestors
    fn is_inclusive_ancestor(&self, ancestor: Self::Node, node: Self::Node) -> bool;

    fn id(&self, node: Self::Node) -> Option<String> {
        self.attribute(node, "id")
    }
    fn set_id(&mut self, node: Self::Node, id: &str) -> Result<()> {
        self.set_attribute(node, "id", id)
    }

    fn attribute(&self, node: Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str) -> Result<()>;
    fn has_attribute(&self, node: Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Add a class token; adding a present token is a no-op
    fn class_list_add(&mut self, node: Self::Node, class: &str) -> Result<()>;
    fn class_list(&self, node: Self::Node) -> Vec<String>;

    fn text_content(&self, node: Self::Node) -> Result<String>;
    fn set_text_content(&mut self, node: Self::Node, text: &str) -> Result<()>;

    fn children(&self, node: Self::Node) -> Result<Vec<Self::Node>>;
    fn append_child(&mut self, parent: Self::Node, child: Self::Node) -> Result<()>;
    fn remove_children(&mut self, node: Self::Node) -> Result<()>;

    /// Deep structural equality
    fn is_equal_node(&self, a: Self::Node, b: Self::Node) -> bool;

    /// Serialize the node and its subtree to markup
    fn outer_html(&self, node: Self::Node) -> Result<String>;
}

impl NodeApi for DomArena {
    type Node = NodeId;

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.add_element(tag)
    }

    fn create_text_node(&mut self, text: &str) -> NodeId {
        self.add_text(text)
    }

    fn create_fragment(&mut self) -> NodeId {
        self.add_fragment()
    }

    fn contains(&self, node: NodeId) -> bool {
        self.get(node).is_ok()
    }

    fn is_element(&self, node: NodeId) -> bool {
        self.get(node).is_ok_and(|n| n.is_element())
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        DomArena::is_inclusive_ancestor(self, ancestor, node).unwrap_or(false)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.get(node).ok()?.attr(name).map(str::to_string)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        self.element_mut(node)?.set_attr(name, value);
        Ok(())
    }

    fn class_list_add(&mut self, node: NodeId, class: &str) -> Result<()> {
        self.add_class(node, class)
    }

    fn class_list(&self, node: NodeId) -> Vec<String> {
        self.get(node)
            .map(|n| n.class_list().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn text_content(&self, node: NodeId) -> Result<String> {
        DomArena::text_content(self, node)
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<()> {
        DomArena::set_text_content(self, node, text)
    }

    fn children(&self, node: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.get(node)?.children_ids.to_vec())
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        DomArena::append_child(self, parent, child)
    }

    fn remove_children(&mut self, node: NodeId) -> Result<()> {
        DomArena::remove_children(self, node)
    }

    fn is_equal_node(&self, a: NodeId, b: NodeId) -> bool {
        DomArena::is_equal_node(self, a, b)
    }

    fn outer_html(&self, node: NodeId) -> Result<String> {
        DomSerializer::new().serialize(self, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the arena purely through the trait, the way builders do
    fn build_card<A: NodeApi>(doc: &mut A) -> A::Node {
        let card = doc.create_element("div");
        doc.set_id(card, "card").unwrap();
        doc.class_list_add(card, "card").unwrap();
        doc.class_list_add(card, "wide").unwrap();
        let title = doc.create_element("h2");
        doc.set_text_content(title, "Title").unwrap();
        doc.append_child(card, title).unwrap();
        card
    }

    #[test]
    fn test_trait_roundtrip() {
        let mut arena = DomArena::new();
        let card = build_card(&mut arena);

        assert_eq!(NodeApi::id(&arena, card).as_deref(), Some("card"));
        assert!(arena.has_attribute(card, "class"));
        assert!(!arena.has_attribute(card, "title"));
        assert_eq!(arena.class_list(card), vec!["card", "wide"]);
        assert_eq!(NodeApi::text_content(&arena, card).unwrap(), "Title");
        assert_eq!(
            arena.outer_html(card).unwrap(),
            "<div id=\"card\" class=\"card wide\"><h2>Title</h2></div>"
        );
    }

    #[test]
    fn test_trait_equality_and_children() {
        let mut arena = DomArena::new();
        let a = build_card(&mut arena);
        let b = build_card(&mut arena);
        assert!(NodeApi::is_equal_node(&arena, a, b));

        NodeApi::remove_children(&mut arena, b).unwrap();
        assert!(NodeApi::children(&arena, b).unwrap().is_empty());
        assert!(!NodeApi::is_equal_node(&arena, a, b));
        assert!(!arena.contains(999));
        let text = arena.create_text_node("t");
        assert!(!arena.is_element(text));
    }

    #[test]
    fn test_trait_inclusive_ancestor() {
        let mut arena = DomArena::new();
        let card = build_card(&mut arena);
        let title = NodeApi::children(&arena, card).unwrap()[0];

        assert!(NodeApi::is_inclusive_ancestor(&arena, card, title));
        assert!(NodeApi::is_inclusive_ancestor(&arena, title, title));
        assert!(!NodeApi::is_inclusive_ancestor(&arena, title, card));
        assert!(!NodeApi::is_inclusive_ancestor(&arena, card, 999));
    }
}
