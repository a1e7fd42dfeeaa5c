//! Arena of rendered view nodes.
//!
//! The widget's markup lives in a [`ViewTree`]: every element of the
//! rendered dropdown is a [`ViewNode`] addressed by a stable [`NodeId`].
//! The engine keeps direct handles to the nodes it updates instead of
//! querying the tree by class name.

use std::collections::{BTreeMap, BTreeSet};

use multiselect_core::logging::targets;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle to a node in a [`ViewTree`].
    pub struct NodeId;
}

/// One rendered element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewNode {
    /// Element tag, e.g. `"div"`.
    pub tag: String,
    /// Class list.
    pub classes: BTreeSet<String>,
    /// Text (or markup) content.
    pub text: String,
    /// Inline styles.
    pub styles: BTreeMap<String, String>,
    /// Other attributes.
    pub attributes: BTreeMap<String, String>,
    /// Whether the node is shown (`display: none` when false).
    pub visible: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl ViewNode {
    /// The parent node, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the node has a class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// An arena of [`ViewNode`]s.
///
/// Operations on a removed (or foreign) [`NodeId`] are ignored; reads
/// return `None`/`false`.
#[derive(Debug, Default)]
pub struct ViewTree {
    nodes: SlotMap<NodeId, ViewNode>,
}

impl ViewTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached node.
    pub fn create(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(ViewNode {
            tag: tag.to_string(),
            visible: true,
            ..Default::default()
        })
    }

    /// Create a detached node with one class.
    pub fn create_with_class(&mut self, tag: &str, class: &str) -> NodeId {
        let id = self.create(tag);
        self.add_class(id, class);
        id
    }

    /// Get a node.
    pub fn get(&self, id: NodeId) -> Option<&ViewNode> {
        self.nodes.get(id)
    }

    /// Whether the node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.classes.remove(class);
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes.get(id).is_some_and(|node| node.has_class(class))
    }

    /// Add or remove a class.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.text = text.into();
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).map(|node| node.text.as_str())
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.styles.insert(property.to_string(), value.into());
        }
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.nodes
            .get(id)
            .and_then(|node| node.styles.get(property))
            .map(String::as_str)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.attributes.insert(name.to_string(), value.into());
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(id)
            .and_then(|node| node.attributes.get(name))
            .map(String::as_str)
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.visible = visible;
        }
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.visible)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_at(parent, child, None);
    }

    /// Insert `child` into `parent` right before `reference`.
    ///
    /// Falls back to appending when `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.insert_at(parent, child, Some(reference));
    }

    /// Insert `child` as the first child of `parent`.
    pub fn prepend(&mut self, parent: NodeId, child: NodeId) {
        match self.children(parent).first().copied() {
            Some(first) => self.insert_before(parent, child, first),
            None => self.append_child(parent, child),
        }
    }

    fn insert_at(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if parent == child
            || !self.nodes.contains_key(parent)
            || !self.nodes.contains_key(child)
            || self.is_descendant(parent, child)
        {
            tracing::warn!(target: targets::RENDER, ?parent, ?child, "refusing invalid tree insertion");
            return;
        }

        self.detach(child);

        let siblings = &mut self.nodes[parent].children;
        let index = reference
            .and_then(|reference| siblings.iter().position(|&c| c == reference))
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        self.nodes[child].parent = Some(parent);
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes.get(id).and_then(|node| node.parent)
            && let Some(parent_node) = self.nodes.get_mut(parent)
        {
            parent_node.children.retain(|&c| c != id);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = None;
        }
    }

    /// Remove a node and its whole subtree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        self.detach(id);

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
            }
        }
    }

    /// Whether `node` is `ancestor` or lies below it.
    pub fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Direct children of `parent` carrying `class`.
    pub fn children_with_class(&self, parent: NodeId, class: &str) -> Vec<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .filter(|&child| self.has_class(child, class))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_parent() {
        let mut tree = ViewTree::new();
        let root = tree.create("div");
        let a = tree.create("span");
        let b = tree.create("span");

        tree.append_child(root, a);
        tree.append_child(root, b);

        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(a), Some(root));
        assert!(tree.is_descendant(b, root));
        assert!(!tree.is_descendant(root, b));
    }

    #[test]
    fn test_insert_before_and_prepend() {
        let mut tree = ViewTree::new();
        let root = tree.create("div");
        let a = tree.create("span");
        let b = tree.create("span");
        let c = tree.create("span");

        tree.append_child(root, a);
        tree.insert_before(root, b, a);
        tree.prepend(root, c);

        assert_eq!(tree.children(root), &[c, b, a]);
    }

    #[test]
    fn test_reparent_moves_node() {
        let mut tree = ViewTree::new();
        let first = tree.create("div");
        let second = tree.create("div");
        let child = tree.create("span");

        tree.append_child(first, child);
        tree.append_child(second, child);

        assert!(tree.children(first).is_empty());
        assert_eq!(tree.children(second), &[child]);
    }

    #[test]
    fn test_cycle_rejected() {
        let mut tree = ViewTree::new();
        let root = tree.create("div");
        let child = tree.create("div");
        tree.append_child(root, child);

        tree.append_child(child, root);
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn test_remove_subtree() {
        let mut tree = ViewTree::new();
        let root = tree.create("div");
        let child = tree.create("div");
        let grandchild = tree.create("span");
        tree.append_child(root, child);
        tree.append_child(child, grandchild);

        tree.remove(child);

        assert!(tree.children(root).is_empty());
        assert!(!tree.contains(child));
        assert!(!tree.contains(grandchild));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_classes_and_styles() {
        let mut tree = ViewTree::new();
        let node = tree.create_with_class("div", "multiselect-option");

        tree.toggle_class(node, "multiselect-selected", true);
        assert!(tree.has_class(node, "multiselect-selected"));
        tree.toggle_class(node, "multiselect-selected", false);
        assert!(!tree.has_class(node, "multiselect-selected"));

        tree.set_style(node, "width", "200px");
        assert_eq!(tree.style(node, "width"), Some("200px"));

        tree.set_visible(node, false);
        assert!(!tree.is_visible(node));
    }

    #[test]
    fn test_stale_id_ignored() {
        let mut tree = ViewTree::new();
        let node = tree.create("div");
        tree.remove(node);

        tree.set_text(node, "ignored");
        assert_eq!(tree.text(node), None);
        assert!(tree.children(node).is_empty());
    }
}
