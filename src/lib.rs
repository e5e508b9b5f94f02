//! DOMJuice - DOM templates driven by directive attributes
//!
//! This library parses markup into a template, finds directive attributes
//! such as `content:="foobar"`, and binds data objects into fresh copies of
//! the template's tree.
//!
//! # Example
//!
//! ```rust
//! use domjuice::{run, Data};
//!
//! let output = run(r#"<p content:="foobar"></p>"#, &Data::new().with("foobar", "test")).unwrap();
//!
//! let doc = output.document();
//! let p = doc.first_child(output.el).unwrap();
//! let text = doc.first_child(p).unwrap();
//! assert_eq!(doc.node_value(text), Some("test"));
//! ```

pub mod config;
pub mod data;
pub mod dom;
pub mod error;
pub mod parser;
pub mod template;

pub use config::{BinderConfig, ConfigError, MissingKeyPolicy, UnknownDirectivePolicy};
pub use data::{Data, DataError};
pub use dom::{Document, DocumentFactory, MarkupFactory, NodeId, NodeKind};
pub use error::ParseError;
pub use template::{
    BindError, Binder, DefineError, DirectiveHandler, DirectiveRegistry, DirectiveSite, Instance,
    RegistryError, Template,
};

use thiserror::Error;

/// Errors that can occur in the one-shot pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Error while defining the template
    #[error("{0}")]
    Define(#[from] DefineError),

    /// Error while binding data
    #[error("{0}")]
    Bind(#[from] BindError),
}

impl Error {
    /// Parse errors behind this error, if any
    pub fn parse_errors(&self) -> &[ParseError] {
        match self {
            Error::Define(DefineError::Parse(errors)) => errors.as_slice(),
            _ => &[],
        }
    }
}

/// Define and instantiate a template in one go with the default binder
///
/// # Example
///
/// ```rust
/// use domjuice::{run, Data};
///
/// let data = Data::new().with("title", "Hello").with("body", "World");
/// let output = run(r#"<h1 content:="title"></h1><p content:="body"></p>"#, &data).unwrap();
/// assert_eq!(output.to_html(), "<h1>Hello</h1><p>World</p>");
/// ```
pub fn run(markup: &str, data: &Data) -> Result<Instance, Error> {
    run_with_config(markup, data, BinderConfig::default())
}

/// Define and instantiate a template in one go with custom configuration
///
/// # Example
///
/// ```rust
/// use domjuice::{run_with_config, BinderConfig, Data, Error};
///
/// let result = run_with_config(r#"<p content:="missing"></p>"#, &Data::new(), BinderConfig::new().strict());
/// assert!(matches!(result, Err(Error::Bind(_))));
/// ```
pub fn run_with_config(markup: &str, data: &Data, config: BinderConfig) -> Result<Instance, Error> {
    let template = Binder::with_config(config).define_markup(markup)?;
    Ok(template.instantiate(data)?)
}
