//! Error types for defining and instantiating templates

use thiserror::Error;

use crate::ParseError;

/// Errors that abort template definition
#[derive(Debug, Error)]
pub enum DefineError {
    /// The document factory could not parse the markup
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// A `name:` attribute with no registered handler, under the reject policy
    #[error("unsupported directive '{kind}:' on <{element}>")]
    UnsupportedDirective {
        kind: String,
        element: String,
        path: Vec<usize>,
    },

    /// A directive on an element its handler cannot bind, e.g. `content:` on `<input>`
    #[error("directive '{kind}:' cannot be used on <{element}>")]
    UnsupportedElement {
        kind: String,
        element: String,
        path: Vec<usize>,
    },

    /// A directive without a data key, e.g. `content:=""`
    #[error("directive '{kind}:' on <{element}> has an empty data key")]
    EmptyKey {
        kind: String,
        element: String,
        path: Vec<usize>,
    },
}

impl From<Vec<ParseError>> for DefineError {
    fn from(errors: Vec<ParseError>) -> Self {
        DefineError::Parse(errors)
    }
}

/// Errors that abort a single instantiation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    /// Data key absent under the strict policy
    #[error("no data for key '{key}' required by directive '{kind}:'")]
    MissingBinding { kind: String, key: String },

    /// Value cannot be written as text
    #[error("directive '{kind}:' cannot render the {found} at key '{key}' as text")]
    NotText {
        kind: String,
        key: String,
        found: &'static str,
    },

    /// Failure reported by a user-registered handler
    #[error("directive '{kind}:' failed: {message}")]
    Handler { kind: String, message: String },
}

impl BindError {
    pub fn handler(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Handler {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Errors from registering directive handlers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate directive handler: {kind}")]
    Duplicate { kind: String },

    #[error("invalid directive kind '{kind}': use letters, digits, '-' or '_'")]
    InvalidKind { kind: String },
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
