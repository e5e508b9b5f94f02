//! Syntax tree for template markup

pub use super::lexer::Span;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A parsed markup fragment: the top-level nodes in source order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    pub nodes: Vec<Spanned<MarkupNode>>,
}

/// One node of markup
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    Element(ElementNode),
    Text(String),
    Comment(String),
}

/// An element with its attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    /// Lowercased tag name
    pub name: Spanned<String>,
    pub attributes: Vec<Spanned<Attribute>>,
    pub children: Vec<Spanned<MarkupNode>>,
}

/// `name`, `name=value` or `name="value"`
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: Spanned<String>,
    /// Empty for bare attributes such as `disabled`
    pub value: String,
}

/// Elements that never have children or an end tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Whether `name` is a void element
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}
