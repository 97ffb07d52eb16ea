//! Arena-based document storage
//!
//! Every node created for a document lives in a single `Vec<DomNode>` and is
//! addressed by a `NodeId` index. Nodes are never freed individually: a
//! detached node stays in the arena until `clear()`.
//!
//! ## Memory Layout
//!
//! ```text
//! Arena: Vec<DomNode>
//!        [Node0][Node1][Node2]...
//!         ↑ 4-byte index, not 8-byte pointer
//! ```

use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId, NodeType};

/// Arena allocator for document nodes
#[derive(Debug, Clone)]
pub struct DomArena {
    /// All nodes stored sequentially (cache-friendly)
    nodes: Vec<DomNode>,
}

impl DomArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
        }
    }

    /// Create arena with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Allocate a detached node, returns its ID
    pub fn add_node(&mut self, node_type: NodeType, node_name: &str) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        self.nodes
            .push(DomNode::new(node_id, node_type, node_name.to_string()));
        node_id
    }

    /// Allocate a detached element
    pub fn add_element(&mut self, tag: &str) -> NodeId {
        self.add_node(NodeType::Element, tag)
    }

    /// Allocate a detached text node
    pub fn add_text(&mut self, text: &str) -> NodeId {
        let node_id = self.add_node(NodeType::Text, "#text");
        self.nodes[node_id as usize].node_value = text.to_string();
        node_id
    }

    /// Allocate an empty fragment
    pub fn add_fragment(&mut self) -> NodeId {
        self.add_node(NodeType::DocumentFragment, "#document-fragment")
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable)
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID, requiring it to be an element
    pub fn element_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        let node = self.get_mut(node_id)?;
        if !node.is_element() {
            return Err(DomError::InvalidNodeType {
                expected: NodeType::Element.as_str().to_string(),
                actual: node.node_type.as_str().to_string(),
            });
        }
        Ok(node)
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over all nodes
    pub fn iter(&self) -> impl Iterator<Item = &DomNode> {
        self.nodes.iter()
    }

    /// Get children of a node
    pub fn children(&self, node_id: NodeId) -> Result<Vec<&DomNode>> {
        let node = self.get(node_id)?;
        node.children_ids
            .iter()
            .map(|&child_id| self.get(child_id))
            .collect()
    }

    /// Get parent of a node
    pub fn parent(&self, node_id: NodeId) -> Result<Option<&DomNode>> {
        let node = self.get(node_id)?;
        match node.parent_id {
            Some(parent_id) => Ok(Some(self.get(parent_id)?)),
            None => Ok(None),
        }
    }

    /// Check whether `ancestor` is `node_id` itself or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node_id: NodeId) -> Result<bool> {
        let mut current = Some(node_id);
        while let Some(id) = current {
            if id == ancestor {
                return Ok(true);
            }
            current = self.get(id)?.parent_id;
        }
        Ok(false)
    }

    /// Traverse tree depth-first (iterative, no recursion)
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&DomNode) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse order (so they're visited left-to-right)
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// Find all nodes matching predicate
    pub fn find<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        self.nodes
            .iter()
            .filter(|&node| predicate(node))
            .map(|node| node.node_id)
            .collect()
    }

    /// Find all elements by tag name
    pub fn find_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.find(|node| node.tag_name().is_some_and(|t| t.eq_ignore_ascii_case(tag)))
    }

    /// Remove a node from its parent's child list
    fn detach(&mut self, node_id: NodeId) -> Result<()> {
        if let Some(parent_id) = self.get_mut(node_id)?.parent_id.take() {
            let parent = self.get_mut(parent_id)?;
            parent.children_ids.retain(|id| *id != node_id);
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`
    ///
    /// DOM semantics: a child with a parent is moved, a fragment hands over
    /// its children and is left empty.
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        let parent_type = self.get(parent_id)?.node_type;
        let child_type = self.get(child_id)?.node_type;

        if !parent_type.is_container() || self.is_inclusive_ancestor(child_id, parent_id)? {
            return Err(DomError::HierarchyRequest {
                parent: parent_id,
                child: child_id,
            });
        }

        if child_type == NodeType::DocumentFragment {
            let moved = std::mem::take(&mut self.get_mut(child_id)?.children_ids);
            for &id in &moved {
                self.get_mut(id)?.parent_id = Some(parent_id);
            }
            self.get_mut(parent_id)?.children_ids.extend(moved);
            return Ok(());
        }

        self.detach(child_id)?;
        self.get_mut(child_id)?.parent_id = Some(parent_id);
        self.get_mut(parent_id)?.children_ids.push(child_id);
        Ok(())
    }

    /// Detach every child of a node
    pub fn remove_children(&mut self, node_id: NodeId) -> Result<()> {
        let removed = std::mem::take(&mut self.get_mut(node_id)?.children_ids);
        for id in removed {
            self.get_mut(id)?.parent_id = None;
        }
        Ok(())
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, node_id: NodeId) -> Result<String> {
        let mut text = String::new();

        self.traverse_df(node_id, |node| {
            if node.node_type == NodeType::Text {
                text.push_str(&node.node_value);
            }
            Ok(())
        })?;

        Ok(text)
    }

    /// DOM `textContent` setter
    ///
    /// Text nodes get their data replaced. Containers lose all children and
    /// receive one text node, unless the value is empty.
    pub fn set_text_content(&mut self, node_id: NodeId, text: &str) -> Result<()> {
        if self.get(node_id)?.is_text() {
            self.get_mut(node_id)?.node_value = text.to_string();
            return Ok(());
        }

        self.remove_children(node_id)?;
        if !text.is_empty() {
            let text_id = self.add_text(text);
            self.append_child(node_id, text_id)?;
        }
        Ok(())
    }

    /// Add a class token unless already present
    pub fn add_class(&mut self, node_id: NodeId, class: &str) -> Result<()> {
        let node = self.element_mut(node_id)?;
        if node.class_list().any(|c| c == class) {
            return Ok(());
        }

        let value = match node.attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim_end(), class)
            }
            _ => class.to_string(),
        };
        node.set_attr("class", &value);
        Ok(())
    }

    /// DOM `isEqualNode`: same type, name, attribute set, data and children
    pub fn is_equal_node(&self, a: NodeId, b: NodeId) -> bool {
        let (Ok(left), Ok(right)) = (self.get(a), self.get(b)) else {
            return false;
        };

        if left.node_type != right.node_type
            || left.node_name != right.node_name
            || left.node_value != right.node_value
            || left.attributes.len() != right.attributes.len()
            || left.children_ids.len() != right.children_ids.len()
        {
            return false;
        }

        // Attribute order is irrelevant for equality
        let same_attrs = left
            .attributes
            .iter()
            .all(|attr| right.attr(&attr.name) == Some(attr.value.as_str()));

        same_attrs
            && left
                .children_ids
                .iter()
                .zip(right.children_ids.iter())
                .all(|(&l, &r)| self.is_equal_node(l, r))
    }

    /// Clear arena (reuse allocation)
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}
