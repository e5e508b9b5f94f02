//! HTML serialization

use crate::parser::is_void_element;

use super::{Document, NodeId, NodeKind};

impl Document {
    /// Serialize `id` and its subtree
    ///
    /// A fragment serializes as the concatenation of its children.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize the children of `id`
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let mut stack = vec![Step::Open(id)];
        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Open(id) => id,
                Step::Close(name) => {
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                    continue;
                }
            };
            match self.kind(id) {
                NodeKind::Fragment => {}
                NodeKind::Text(text) => out.push_str(&escape_text(text)),
                NodeKind::Comment(text) => {
                    out.push_str("<!--");
                    out.push_str(text);
                    out.push_str("-->");
                }
                NodeKind::Element(el) => {
                    out.push('<');
                    out.push_str(&el.name);
                    for (name, value) in &el.attributes {
                        out.push(' ');
                        out.push_str(name);
                        out.push_str("=\"");
                        out.push_str(&escape_attribute(value));
                        out.push('"');
                    }
                    out.push('>');
                    if is_void_element(&el.name) {
                        continue;
                    }
                    stack.push(Step::Close(&el.name));
                }
            }
            stack.extend(self.children(id).iter().rev().map(|&c| Step::Open(c)));
        }
    }
}

/// Pending work for [`Document::write_node`]
enum Step<'a> {
    Open(NodeId),
    Close(&'a str),
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_escapes_text_and_attributes() {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        doc.set_attribute(a, "title", r#"say "hi" & go"#);
        let t = doc.create_text("1 < 2");
        doc.append_child(doc.root(), a);
        doc.append_child(a, t);
        assert_eq!(
            doc.to_html(doc.root()),
            r#"<a title="say &quot;hi&quot; &amp; go">1 &lt; 2</a>"#
        );
    }

    #[test]
    fn test_void_elements_have_no_end_tag() {
        let mut doc = Document::new();
        let br = doc.create_element("br");
        let p = doc.create_element("p");
        doc.append_child(doc.root(), br);
        doc.append_child(doc.root(), p);
        assert_eq!(doc.to_html(doc.root()), "<br><p></p>");
    }

    #[test]
    fn test_inner_html_skips_own_tag() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        let c = doc.create_comment(" note ");
        doc.append_child(doc.root(), p);
        doc.append_child(p, c);
        assert_eq!(doc.inner_html(p), "<!-- note -->");
    }
}
