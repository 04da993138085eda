//! Error types for state migration
//!
//! Covers:
//! - Unsupported source schema versions
//! - Processor parameters outside the known name table
//! - Version tables that do not chain
//! - Malformed migration configuration

/// Errors raised while migrating a state record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// No migration path from the recorded version
    #[error("unexpected schema version: {version} (current is {current})")]
    UnsupportedVersion {
        /// Version found on the record
        version: i64,
        /// Version the migrator produces
        current: i64,
    },

    /// Processor parameter name has no named field in the current schema
    #[error("unexpected parameter name for processor: {name} (at '{key}')")]
    UnrecognizedParameterName {
        /// Symbolic name found in the record
        name: String,
        /// Key the name was read from
        key: String,
    },

    /// Steps registered with the migrator do not form a chain from version 0
    #[error("broken migration chain: expected a step from version {expected}, found one from {found}")]
    BrokenChain {
        /// Source version the next step should start at
        expected: i64,
        /// Source version it actually starts at
        found: i64,
    },
}

impl MigrationError {
    /// Check if error is retryable
    ///
    /// Migration is deterministic: the same input fails the same way.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Errors loading migration configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Document is not valid TOML or has wrong field types
    #[error("invalid migration config: {0}")]
    InvalidToml(#[from] toml::de::Error),
}
