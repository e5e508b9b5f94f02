//! Bound template output

use std::fmt;

use crate::dom::{Document, NodeId};

/// The result of binding data into a template
///
/// `el` is the root of the bound tree: a fragment whose children are the
/// template's top-level nodes. For `<p content:="k"></p>` the text lives at
/// `el` → first child (`<p>`) → first child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    document: Document,
    pub el: NodeId,
}

impl Instance {
    pub(crate) fn new(document: Document) -> Self {
        let el = document.root();
        Self { document, el }
    }

    /// The instance's own tree, shared with nothing else
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// First top-level element of the output, skipping text and comments
    pub fn first_element(&self) -> Option<NodeId> {
        self.document
            .children(self.el)
            .iter()
            .copied()
            .find(|&n| self.document.is_element(n))
    }

    /// Serialized output
    pub fn to_html(&self) -> String {
        self.document.inner_html(self.el)
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}
