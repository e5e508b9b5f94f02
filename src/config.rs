//! Binder configuration
//!
//! Policies can be set with the builder methods or loaded from a TOML file:
//!
//! ```toml
//! [binder]
//! missing_key = "strict"        # or "skip"
//! unknown_directive = "reject"  # or "ignore"
//! strip_directives = false
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading configuration files
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// What to do when a directive's data key is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingKeyPolicy {
    /// Leave the node as it is in the template and keep binding
    #[default]
    Skip,
    /// Fail the whole instantiation
    Strict,
}

/// What to do with a `name:` attribute whose kind has no handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownDirectivePolicy {
    /// Keep the attribute as plain markup and log it
    #[default]
    Ignore,
    /// Fail template definition
    Reject,
}

/// Configuration options for the template binder
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinderConfig {
    pub missing_key: MissingKeyPolicy,

    pub unknown_directive: UnknownDirectivePolicy,

    /// Remove recognized directive attributes from the template tree
    pub strip_directives: bool,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            missing_key: MissingKeyPolicy::Skip,
            unknown_directive: UnknownDirectivePolicy::Ignore,
            strip_directives: true,
        }
    }
}

/// TOML structure for deserializing config files
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    binder: BinderConfig,
}

impl BinderConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        Ok(parsed.binder)
    }

    pub fn with_missing_key(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_key = policy;
        self
    }

    /// Shorthand for [`MissingKeyPolicy::Strict`]
    pub fn strict(self) -> Self {
        self.with_missing_key(MissingKeyPolicy::Strict)
    }

    pub fn with_unknown_directive(mut self, policy: UnknownDirectivePolicy) -> Self {
        self.unknown_directive = policy;
        self
    }

    pub fn with_strip_directives(mut self, strip: bool) -> Self {
        self.strip_directives = strip;
        self
    }
}
