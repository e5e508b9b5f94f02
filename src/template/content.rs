//! The `content:` directive: write a data value as the element's text

use serde_json::Value;

use crate::data::value_kind;
use crate::dom::Document;
use crate::parser::is_void_element;

use super::directive::{DirectiveHandler, DirectiveSite};
use super::error::BindError;

/// Sets the element's text content to the bound value
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentDirective;

impl DirectiveHandler for ContentDirective {
    fn bind(
        &self,
        doc: &mut Document,
        site: &DirectiveSite,
        value: &Value,
    ) -> Result<(), BindError> {
        let text = value_text(value).ok_or_else(|| BindError::NotText {
            kind: site.kind.clone(),
            key: site.key.clone(),
            found: value_kind(value),
        })?;
        doc.set_text_content(site.node, text);
        Ok(())
    }

    /// Void elements never serialize children, so their text would be lost
    fn accepts(&self, element: &str) -> bool {
        !is_void_element(element)
    }
}

/// Text form of a scalar value; `None` for arrays and objects
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
