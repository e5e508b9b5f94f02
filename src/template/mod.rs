//! Template definition and instantiation
//!
//! A [`Binder`] parses markup into a [`Template`], recording every directive
//! attribute (`<kind>:="<key>"`) it recognizes as a [`DirectiveSite`]. Calling
//! [`Template::instantiate`] copies the template's tree, hands each site's
//! data value to the handler registered for its kind, and returns the copy as
//! an [`Instance`].
//!
//! # Example
//!
//! ```rust
//! use domjuice::{Binder, Data};
//!
//! let template = Binder::new().define_markup(r#"<p content:="foobar"></p>"#).unwrap();
//! let output = template.instantiate(&Data::new().with("foobar", "test")).unwrap();
//! assert_eq!(output.to_html(), "<p>test</p>");
//! ```
//!
//! Only `content:` is built in. Other kinds are added by registering a
//! [`DirectiveHandler`] on the binder.

mod binder;
mod content;
mod directive;
mod error;
mod instance;
mod registry;

pub use binder::{Binder, Template};
pub use content::{value_text, ContentDirective};
pub use directive::{directive_kind, DirectiveHandler, DirectiveSite};
pub use error::{BindError, DefineError, RegistryError};
pub use instance::Instance;
pub use registry::DirectiveRegistry;
