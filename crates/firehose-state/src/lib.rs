//! Firehose State
//!
//! Schema-versioned migration of flattened delivery stream state.
//!
//! # Core Concepts
//!
//! - [`AttributeBag`]: dotted string keys to string values, the persisted form
//! - [`AttributePath`]: typed view of a key (`name`, index, `#` count segments)
//! - [`KeyPattern`]: matcher for families of keys with positional wildcards
//! - [`MigrationStep`]: one schema version transition over a bag
//! - [`Migrator`]: chains steps from a recorded version to the current one
//!
//! # Example
//!
//! ```
//! use firehose_state::{AttributeBag, Migrator};
//!
//! let mut bag: AttributeBag = [("role_arn", "arn:role"), ("s3_bucket_arn", "arn:bucket")]
//!     .into_iter()
//!     .collect();
//! Migrator::new().migrate(0, &mut bag)?;
//!
//! assert_eq!(bag.get("extended_s3_configuration.#"), Some("1"));
//! assert_eq!(bag.get("extended_s3_configuration.0.bucket_arn"), Some("arn:bucket"));
//! # Ok::<(), firehose_state::MigrationError>(())
//! ```

#![warn(unreachable_pub)]

// Core modules
mod arn;
mod bag;
mod config;
mod error;
mod migrator;
mod parameter;
mod path;
mod pattern;
mod step;

/// Built-in steps
pub mod steps;

// Re-exports
pub use arn::{import_state, ArnError, DeliveryStreamArn};
pub use bag::{AttributeBag, InstanceState};
pub use config::MigrationConfig;
pub use error::{ConfigError, MigrationError};
pub use migrator::{MigrationReport, Migrator, MigratorBuilder, CURRENT_SCHEMA_VERSION};
pub use parameter::{ProcessorParameter, UnknownParameter};
pub use path::{AttributePath, PathError, Segment, COUNT_SEGMENT};
pub use pattern::{KeyPattern, INDEX_WILDCARD};
pub use step::{MigrationStep, StepReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
