//! Registry mapping directive kinds to their handlers

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::content::ContentDirective;
use super::directive::DirectiveHandler;
use super::error::RegistryError;

/// Directive handlers keyed by kind
///
/// Handlers are reference counted, so cloning a registry is cheap and a
/// template keeps working with the handlers it was defined with even if the
/// binder's registry changes later.
#[derive(Clone, Default)]
pub struct DirectiveRegistry {
    handlers: HashMap<String, Arc<dyn DirectiveHandler>>,
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl DirectiveRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in `content` directive
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .handlers
            .insert("content".to_string(), Arc::new(ContentDirective));
        registry
    }

    /// Register a handler for a new directive kind
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        handler: impl DirectiveHandler + 'static,
    ) -> Result<(), RegistryError> {
        let kind = kind.into();
        if !is_valid_kind(&kind) {
            return Err(RegistryError::InvalidKind { kind });
        }
        if self.handlers.contains_key(&kind) {
            return Err(RegistryError::Duplicate { kind });
        }
        self.handlers.insert(kind, Arc::new(handler));
        Ok(())
    }

    /// Remove a handler, returning whether one was registered
    pub fn unregister(&mut self, kind: &str) -> bool {
        self.handlers.remove(kind).is_some()
    }

    /// Get the handler for a kind
    pub fn get(&self, kind: &str) -> Option<&Arc<dyn DirectiveHandler>> {
        self.handlers.get(kind)
    }

    /// Check if a kind has a handler
    pub fn contains(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.handlers.keys().map(|k| k.as_str()).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

fn is_valid_kind(kind: &str) -> bool {
    !kind.is_empty()
        && kind
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
