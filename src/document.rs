// SPDX-License-Identifier: MPL-2.0
//! Minimal element tree backing the gallery page scan.
//!
//! This is not a general DOM: it carries exactly what gallery discovery
//! needs, which is structural containment (tags, classes, parent/child
//! links) and document-order traversal. Nodes are arena-allocated and
//! addressed by [`NodeId`], so element identity is cheap to compare and
//! hash.

use std::collections::BTreeSet;

/// Handle to a node in a [`Document`]. Stable for the document's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    classes: BTreeSet<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed element tree.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Creates a detached element with the given tag.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            tag: tag.to_string(),
            classes: BTreeSet::new(),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Creates a detached element carrying one class.
    pub fn create_element_with_class(&mut self, tag: &str, class: &str) -> NodeId {
        let id = self.create_element(tag);
        self.add_class(id, class);
        id
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.insert(class.to_string());
    }

    /// Appends `child` to `parent`'s child list. A node has at most one
    /// parent; re-appending an attached node is a caller bug.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0].parent.is_none());
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.contains(class)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// All elements bearing `class`, in document order.
    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        for root in self.roots() {
            self.collect(root, &mut found, &|doc, n| doc.has_class(n, class));
        }
        found
    }

    /// Descendants of `root` (excluding `root` itself) with the given tag,
    /// in document order.
    pub fn descendants_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        for &child in self.children(root) {
            self.collect(child, &mut found, &|doc, n| doc.tag(n) == tag);
        }
        found
    }

    /// First descendant of `root` (excluding `root`) bearing `class`.
    pub fn descendant_by_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        let mut found = Vec::new();
        for &child in self.children(root) {
            self.collect(child, &mut found, &|doc, n| doc.has_class(n, class));
            if let Some(&first) = found.first() {
                return Some(first);
            }
        }
        None
    }

    /// Nearest element bearing `class`, starting from `node` itself and
    /// walking up through its ancestors.
    pub fn closest(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if self.has_class(n, class) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(i, _)| NodeId(i))
    }

    fn collect(&self, node: NodeId, out: &mut Vec<NodeId>, pred: &dyn Fn(&Self, NodeId) -> bool) {
        if pred(self, node) {
            out.push(node);
        }
        for &child in self.children(node) {
            self.collect(child, out, pred);
        }
    }
}
