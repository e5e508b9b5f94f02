//! Defining templates from markup and binding them against data

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{BinderConfig, MissingKeyPolicy, UnknownDirectivePolicy};
use crate::data::Data;
use crate::dom::{Document, DocumentFactory, MarkupFactory, NodeId};

use super::directive::{directive_kind, DirectiveHandler, DirectiveSite};
use super::error::{BindError, DefineError, RegistryError};
use super::instance::Instance;
use super::registry::DirectiveRegistry;

/// Turns markup into reusable [`Template`]s
///
/// A binder owns the configuration and the directive registry. Both are
/// copied into every template it defines, so templates stay valid on their
/// own and later registrations only affect later definitions.
#[derive(Debug, Clone)]
pub struct Binder {
    config: BinderConfig,
    registry: DirectiveRegistry,
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

impl Binder {
    /// Binder with the default configuration and built-in directives
    pub fn new() -> Self {
        Self::with_config(BinderConfig::default())
    }

    pub fn with_config(config: BinderConfig) -> Self {
        Self {
            config,
            registry: DirectiveRegistry::with_builtins(),
        }
    }

    /// Binder with an explicit registry, e.g. one without the built-ins
    pub fn with_registry(config: BinderConfig, registry: DirectiveRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    pub fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    /// Register a handler for an additional directive kind
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        handler: impl DirectiveHandler + 'static,
    ) -> Result<(), RegistryError> {
        self.registry.register(kind, handler)
    }

    /// Parse `markup` with `factory` and record its directive sites
    ///
    /// Nothing is returned unless the whole definition succeeds.
    pub fn define<F>(&self, markup: &str, factory: &F) -> Result<Template, DefineError>
    where
        F: DocumentFactory + ?Sized,
    {
        let parsed = factory.parse(markup)?;

        // Re-pack the arena in document order; instances are plain clones
        // of this document, so node ids stay valid across all of them.
        let mut document = parsed.clone_subtree(parsed.root());

        let elements: Vec<NodeId> = document
            .descendants(document.root())
            .filter(|&n| document.is_element(n))
            .collect();

        let mut sites = Vec::new();
        let mut handlers = Vec::new();
        for node in elements {
            self.discover(&mut document, node, &mut sites, &mut handlers)?;
        }

        debug!(
            sites = sites.len(),
            nodes = document.node_count(),
            "defined template"
        );

        Ok(Template {
            document,
            sites,
            handlers,
            missing_key: self.config.missing_key,
        })
    }

    /// [`Binder::define`] with the bundled markup parser
    pub fn define_markup(&self, markup: &str) -> Result<Template, DefineError> {
        self.define(markup, &MarkupFactory)
    }

    fn discover(
        &self,
        document: &mut Document,
        node: NodeId,
        sites: &mut Vec<DirectiveSite>,
        handlers: &mut Vec<Arc<dyn DirectiveHandler>>,
    ) -> Result<(), DefineError> {
        let attributes = document.attributes(node).to_vec();
        if !attributes.iter().any(|(name, _)| directive_kind(name).is_some()) {
            return Ok(());
        }
        let element = document.tag_name(node).unwrap_or_default().to_string();
        // Every element reached from the root has a path
        let path = document.path_of(node).unwrap_or_default();

        for (attribute, key) in attributes {
            let Some(kind) = directive_kind(&attribute) else {
                continue;
            };

            let Some(handler) = self.registry.get(kind) else {
                match self.config.unknown_directive {
                    UnknownDirectivePolicy::Reject => {
                        return Err(DefineError::UnsupportedDirective {
                            kind: kind.to_string(),
                            element,
                            path,
                        });
                    }
                    UnknownDirectivePolicy::Ignore => {
                        warn!(kind = %kind, element = %element, "ignoring unsupported directive");
                        continue;
                    }
                }
            };

            if key.is_empty() {
                return Err(DefineError::EmptyKey {
                    kind: kind.to_string(),
                    element,
                    path,
                });
            }

            if !handler.accepts(&element) {
                return Err(DefineError::UnsupportedElement {
                    kind: kind.to_string(),
                    element,
                    path,
                });
            }

            if self.config.strip_directives {
                document.remove_attribute(node, &attribute);
            }

            sites.push(DirectiveSite {
                kind: kind.to_string(),
                attribute: attribute.clone(),
                key,
                node,
                path: path.clone(),
            });
            handlers.push(Arc::clone(handler));
        }
        Ok(())
    }
}

/// A parsed template and the directive sites found in it
///
/// Templates are never mutated after definition; [`Template::instantiate`]
/// works on a private copy of the tree, so a template can be shared across
/// threads and instantiated concurrently.
#[derive(Clone)]
pub struct Template {
    document: Document,
    sites: Vec<DirectiveSite>,
    /// Handler for each entry of `sites`, resolved at definition time
    handlers: Vec<Arc<dyn DirectiveHandler>>,
    missing_key: MissingKeyPolicy,
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("document", &self.document)
            .field("sites", &self.sites)
            .field("missing_key", &self.missing_key)
            .finish()
    }
}

impl Template {
    /// Directive sites in document order
    pub fn sites(&self) -> &[DirectiveSite] {
        &self.sites
    }

    /// The template's canonical tree
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn missing_key_policy(&self) -> MissingKeyPolicy {
        self.missing_key
    }

    /// Serialized template markup, directives stripped if so configured
    pub fn to_html(&self) -> String {
        self.document.to_html(self.document.root())
    }

    /// Bind `data` into a fresh copy of the template
    ///
    /// Sites are applied in document order. On error the partially bound
    /// copy is discarded and the template is unaffected.
    pub fn instantiate(&self, data: &Data) -> Result<Instance, BindError> {
        let mut document = self.document.clone();

        for (site, handler) in self.sites.iter().zip(&self.handlers) {
            match data.get(&site.key) {
                Some(value) => handler.bind(&mut document, site, value)?,
                None => match self.missing_key {
                    MissingKeyPolicy::Strict => {
                        return Err(BindError::MissingBinding {
                            kind: site.kind.clone(),
                            key: site.key.clone(),
                        });
                    }
                    MissingKeyPolicy::Skip => {
                        warn!(
                            kind = %site.kind,
                            key = %site.key,
                            "no data for directive, leaving node unchanged"
                        );
                    }
                },
            }
        }

        debug!(sites = self.sites.len(), "instantiated template");
        Ok(Instance::new(document))
    }
}
