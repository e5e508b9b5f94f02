//! Turning markup into a [`Document`]

use crate::parser::{self, Fragment, MarkupNode, Spanned};
use crate::ParseError;

use super::{Document, NodeId};

/// Capability that parses markup into a DOM tree
///
/// The returned document's root is a fragment whose children are the
/// top-level nodes of the markup. Any `Fn(&str) -> Result<Document, _>`
/// closure is a factory too.
pub trait DocumentFactory {
    fn parse(&self, markup: &str) -> Result<Document, Vec<ParseError>>;
}

impl<F> DocumentFactory for F
where
    F: Fn(&str) -> Result<Document, Vec<ParseError>>,
{
    fn parse(&self, markup: &str) -> Result<Document, Vec<ParseError>> {
        self(markup)
    }
}

/// Default factory backed by the bundled markup parser
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupFactory;

impl MarkupFactory {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentFactory for MarkupFactory {
    fn parse(&self, markup: &str) -> Result<Document, Vec<ParseError>> {
        let fragment = parser::parse(markup)?;
        Ok(Document::from_fragment(&fragment))
    }
}

impl Document {
    /// Build a document from a parsed fragment
    pub fn from_fragment(fragment: &Fragment) -> Self {
        let mut doc = Document::new();
        let mut stack: Vec<(NodeId, &Spanned<MarkupNode>)> =
            fragment.nodes.iter().rev().map(|n| (doc.root(), n)).collect();
        while let Some((parent, node)) = stack.pop() {
            let id = doc.create_markup_node(node);
            doc.append_child(parent, id);
            if let MarkupNode::Element(el) = &node.node {
                stack.extend(el.children.iter().rev().map(|c| (id, c)));
            }
        }
        doc
    }

    /// Create the node for `node` itself, without its children
    fn create_markup_node(&mut self, node: &Spanned<MarkupNode>) -> NodeId {
        match &node.node {
            MarkupNode::Text(text) => self.create_text(text.as_str()),
            MarkupNode::Comment(text) => self.create_comment(text.as_str()),
            MarkupNode::Element(el) => {
                let id = self.create_element(el.name.node.as_str());
                for attr in &el.attributes {
                    self.set_attribute(id, &attr.node.name.node, attr.node.value.as_str());
                }
                id
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeKind;

    #[test]
    fn test_markup_factory_builds_tree() {
        let doc = MarkupFactory.parse(r#"<p class="x">hi</p>"#).unwrap();
        let p = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.tag_name(p), Some("p"));
        assert_eq!(doc.attribute(p, "class"), Some("x"));
        assert_eq!(doc.text_content(p), "hi");
    }

    #[test]
    fn test_markup_factory_reports_parse_errors() {
        let errs = MarkupFactory.parse("<p>").unwrap_err();
        assert!(!errs.is_empty());
    }

    #[test]
    fn test_closure_factory() {
        let factory = |markup: &str| -> Result<Document, Vec<ParseError>> {
            let mut doc = Document::new();
            let text = doc.create_text(markup);
            let root = doc.root();
            doc.append_child(root, text);
            Ok(doc)
        };
        let doc = factory.parse("raw").unwrap();
        let child = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.kind(child), &NodeKind::Text("raw".to_string()));
    }
}
