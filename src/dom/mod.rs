//! Minimal arena-allocated DOM
//!
//! Nodes live in a `Vec` owned by a [`Document`] and refer to each other by
//! [`NodeId`]. Cloning a subtree copies it into a fresh arena, so two clones
//! never share a node.

mod factory;
mod serialize;

pub use factory::{DocumentFactory, MarkupFactory};

/// Index of a node inside its [`Document`]
///
/// Ids are only meaningful for the document that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Element name and attributes in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Container for a parsed fragment; the root of every parsed document
    Fragment,
    Element(ElementData),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// A DOM tree stored in an arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding an empty fragment root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Fragment)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, detached ones and the root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let pos = siblings.iter().position(|&c| c == id)?;
        pos.checked_sub(1).map(|p| siblings[p])
    }

    /// Character data of text and comment nodes
    pub fn node_value(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Text(s) | NodeKind::Comment(s) => Some(s),
            NodeKind::Element(_) | NodeKind::Fragment => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Element(_))
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Text(_))
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Element(el) => Some(&el.name),
            _ => None,
        }
    }

    /// Attributes of an element; empty for every other node kind
    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        match self.kind(id) {
            NodeKind::Element(el) => &el.attributes,
            _ => &[],
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|n| match self.kind(n) {
                NodeKind::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Pre-order (document order) traversal starting at `id`, inclusive
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.push(NodeKind::Element(ElementData {
            name: name.into(),
            attributes: Vec::new(),
        }))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Comment(text.into()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Remove `id` from its parent's child list; the node stays in the arena
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    pub fn remove_children(&mut self, id: NodeId) {
        for child in std::mem::take(&mut self.nodes[id.0].children) {
            self.nodes[child.0].parent = None;
        }
    }

    /// Set or replace an attribute; ignored for non-element nodes
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let NodeKind::Element(el) = &mut self.nodes[id.0].kind {
            let value = value.into();
            match el.attributes.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => *v = value,
                None => el.attributes.push((name.to_string(), value)),
            }
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(el) => {
                let pos = el.attributes.iter().position(|(n, _)| n == name)?;
                Some(el.attributes.remove(pos).1)
            }
            _ => None,
        }
    }

    /// Replace the data of a text or comment node
    ///
    /// Returns false if the node carries no character data.
    pub fn set_node_value(&mut self, id: NodeId, value: impl Into<String>) -> bool {
        match &mut self.nodes[id.0].kind {
            NodeKind::Text(s) | NodeKind::Comment(s) => {
                *s = value.into();
                true
            }
            _ => false,
        }
    }

    /// Replace the content of `id` with a single text node
    ///
    /// A sole existing text child is reused; any other children are dropped.
    /// Text and comment nodes have their own data replaced instead.
    pub fn set_text_content(&mut self, id: NodeId, text: impl Into<String>) {
        let text = text.into();
        if self.set_node_value(id, text.clone()) {
            return;
        }
        if let [only] = self.children(id) {
            let only = *only;
            if self.is_text(only) {
                self.set_node_value(only, text);
                return;
            }
        }
        self.remove_children(id);
        let node = self.create_text(text);
        self.append_child(id, node);
    }

    /// Deep-copy the subtree rooted at `id` into a new document
    ///
    /// The copy of `id` becomes the new root. Nodes are laid out in document
    /// order, and child-index paths are preserved.
    pub fn clone_subtree(&self, id: NodeId) -> Document {
        let mut nodes: Vec<Node> = Vec::new();
        let mut stack = vec![(id, None)];
        while let Some((old, parent)) = stack.pop() {
            let new_id = NodeId(nodes.len());
            nodes.push(Node {
                kind: self.kind(old).clone(),
                parent,
                children: Vec::new(),
            });
            if let Some(parent) = parent {
                nodes[parent.0].children.push(new_id);
            }
            stack.extend(self.children(old).iter().rev().map(|&c| (c, Some(new_id))));
        }
        Document {
            nodes,
            root: NodeId(0),
        }
    }

    /// Child indices leading from the root to `id`
    ///
    /// Returns `None` if `id` is not attached under the root.
    pub fn path_of(&self, id: NodeId) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        let mut current = id;
        while current != self.root {
            let parent = self.parent(current)?;
            let pos = self.children(parent).iter().position(|&c| c == current)?;
            path.push(pos);
            current = parent;
        }
        path.reverse();
        Some(path)
    }

    /// Follow child indices from the root
    pub fn resolve_path(&self, path: &[usize]) -> Option<NodeId> {
        path.iter()
            .try_fold(self.root, |node, &i| self.children(node).get(i).copied())
    }
}

/// Iterator returned by [`Document::descendants`]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}
