//! Migration configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Diagnostic switches for a [`Migrator`](crate::Migrator)
///
/// Neither switch changes the migrated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Dump the bag at debug level before and after each step
    pub trace_attributes: bool,
    /// Warn about orphaned parameter values dropped during cleanup
    pub warn_on_orphans: bool,
}

impl MigrationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With attribute tracing
    #[inline]
    #[must_use]
    pub fn with_trace_attributes(mut self, enabled: bool) -> Self {
        self.trace_attributes = enabled;
        self
    }

    /// With orphan warnings
    #[inline]
    #[must_use]
    pub fn with_warn_on_orphans(mut self, enabled: bool) -> Self {
        self.warn_on_orphans = enabled;
        self
    }

    /// Parse from a TOML document
    ///
    /// Missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML for this type
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(document)?)
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            trace_attributes: true,
            warn_on_orphans: true,
        }
    }
}
