//! Directive attributes and the sites they are found at

use serde_json::Value;

use crate::dom::{Document, NodeId};

use super::error::BindError;

/// A directive attribute recorded while defining a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveSite {
    /// Directive kind, e.g. `content`
    pub kind: String,
    /// Attribute name as written, e.g. `content:`
    pub attribute: String,
    /// Data key the attribute value names
    pub key: String,
    /// Element carrying the directive; valid in the template and in every instance
    pub node: NodeId,
    /// Child indices from the root to `node`
    pub path: Vec<usize>,
}

/// Binding strategy for one directive kind
///
/// Handlers get the instance's freshly cloned document, never the template's,
/// so they may mutate it freely. Closures with the same signature as
/// [`DirectiveHandler::bind`] are handlers too.
pub trait DirectiveHandler: Send + Sync {
    fn bind(&self, doc: &mut Document, site: &DirectiveSite, value: &Value)
        -> Result<(), BindError>;

    /// Whether the directive may appear on `element`; checked at definition
    fn accepts(&self, _element: &str) -> bool {
        true
    }
}

impl<F> DirectiveHandler for F
where
    F: Fn(&mut Document, &DirectiveSite, &Value) -> Result<(), BindError> + Send + Sync,
{
    fn bind(
        &self,
        doc: &mut Document,
        site: &DirectiveSite,
        value: &Value,
    ) -> Result<(), BindError> {
        self(doc, site, value)
    }
}

/// Directive kind named by an attribute, if the attribute is a directive
///
/// `content:` names `content`; `content`, `:` and `a::` are not directives.
pub fn directive_kind(attribute: &str) -> Option<&str> {
    let kind = attribute.strip_suffix(':')?;
    if kind.is_empty() || kind.ends_with(':') {
        None
    } else {
        Some(kind)
    }
}
