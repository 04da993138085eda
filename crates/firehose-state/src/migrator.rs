//! Version dispatch over the step table
//!
//! [`Migrator`] owns an immutable, contiguous table of steps and chains the
//! ones needed to bring a record from its recorded version to the current
//! one.

use std::fmt;

use tracing::{debug, info};

use crate::bag::{AttributeBag, InstanceState};
use crate::config::MigrationConfig;
use crate::error::MigrationError;
use crate::step::{MigrationStep, StepReport};
use crate::steps::{ExtendS3Configuration, PromoteLegacyS3};

/// Schema version written by the current resource definition
pub const CURRENT_SCHEMA_VERSION: i64 = 2;

/// Chains migration steps from any supported version to the current one
///
/// Holds no mutable state; one migrator may be shared across threads, each
/// migrating its own bag.
pub struct Migrator {
    steps: Vec<Box<dyn MigrationStep>>,
    config: MigrationConfig,
}

impl Migrator {
    /// Migrator for delivery stream state (v0 → v1 → v2)
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MigrationConfig::default())
    }

    /// Standard step table with custom diagnostics
    #[must_use]
    pub fn with_config(config: MigrationConfig) -> Self {
        let steps: Vec<Box<dyn MigrationStep>> = vec![
            Box::new(PromoteLegacyS3::new()),
            Box::new(ExtendS3Configuration::new()),
        ];
        Self { steps, config }
    }

    /// Start building a custom step table
    #[inline]
    #[must_use]
    pub fn builder() -> MigratorBuilder {
        MigratorBuilder::new()
    }

    /// Version every migration ends at
    #[inline]
    #[must_use]
    pub fn current_version(&self) -> i64 {
        self.steps
            .last()
            .map_or(0, |step| step.target_version())
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Steps needed to bring `source_version` up to date, earliest first
    ///
    /// # Errors
    /// Returns [`MigrationError::UnsupportedVersion`] for versions outside the table
    pub fn plan(&self, source_version: i64) -> Result<&[Box<dyn MigrationStep>], MigrationError> {
        let unsupported = || MigrationError::UnsupportedVersion {
            version: source_version,
            current: self.current_version(),
        };
        let start = usize::try_from(source_version).map_err(|_| unsupported())?;
        self.steps.get(start..).ok_or_else(unsupported)
    }

    /// Migrate a bag recorded at `source_version` to the current version
    ///
    /// The chain runs on a working copy; the bag is only replaced once every
    /// step has succeeded.
    ///
    /// # Errors
    /// Returns error if the version is unsupported or a step rejects the bag.
    /// The bag is unmodified in both cases.
    pub fn migrate(
        &self,
        source_version: i64,
        bag: &mut AttributeBag,
    ) -> Result<MigrationReport, MigrationError> {
        let plan = self.plan(source_version)?;
        let mut report = MigrationReport::new(source_version, self.current_version());
        if plan.is_empty() {
            debug!(version = source_version, "state is current; nothing to migrate");
            return Ok(report);
        }

        info!(
            from = source_version,
            to = report.target_version,
            "found delivery stream state v{source_version}; migrating to v{}",
            report.target_version
        );

        let mut working = bag.clone();
        for step in plan {
            let from = step.source_version();
            let to = step.target_version();
            if self.config.trace_attributes {
                debug!(attributes = ?working, "attributes before migration from v{from} to v{to}");
            }

            let step_report = step.apply(&mut working, &self.config)?;

            if self.config.trace_attributes {
                debug!(attributes = ?working, "attributes after migration from v{from} to v{to}");
            }
            debug!(step = %step.describe(), ?step_report, "step complete");
            report.steps.push(step_report);
        }

        *bag = working;
        Ok(report)
    }

    /// Migrate a persisted record
    ///
    /// An absent record stays absent. On success the record is stamped with
    /// the current version.
    ///
    /// # Errors
    /// Returns error if the record's version is unsupported or a step fails
    pub fn migrate_state(
        &self,
        state: Option<InstanceState>,
    ) -> Result<Option<InstanceState>, MigrationError> {
        let Some(mut state) = state else {
            debug!("no delivery stream state; nothing to migrate");
            return Ok(None);
        };
        self.migrate(state.schema_version, &mut state.attributes)?;
        state.schema_version = self.current_version();
        Ok(Some(state))
    }
}

impl Default for Migrator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Migrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Migrator")
            .field("current_version", &self.current_version())
            .field("steps", &self.steps)
            .field("config", &self.config)
            .finish()
    }
}

/// Outcome of one [`Migrator::migrate`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Version the bag was recorded at
    pub source_version: i64,
    /// Version the bag now conforms to
    pub target_version: i64,
    /// Per-step counters, in execution order
    pub steps: Vec<StepReport>,
}

impl MigrationReport {
    fn new(source_version: i64, target_version: i64) -> Self {
        Self {
            source_version,
            target_version,
            steps: Vec::new(),
        }
    }

    /// Check if no step changed the bag
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.steps.iter().all(StepReport::is_noop)
    }
}

/// Builder for migrators with a custom step table
#[derive(Debug, Default)]
pub struct MigratorBuilder {
    steps: Vec<Box<dyn MigrationStep>>,
    config: MigrationConfig,
}

impl MigratorBuilder {
    /// Create new builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next step of the chain
    #[inline]
    #[must_use]
    pub fn step(mut self, step: impl MigrationStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Set diagnostics
    #[inline]
    #[must_use]
    pub fn config(mut self, config: MigrationConfig) -> Self {
        self.config = config;
        self
    }

    /// Build migrator
    ///
    /// # Errors
    /// Returns [`MigrationError::BrokenChain`] unless steps run 0 → 1 → … in order
    pub fn build(self) -> Result<Migrator, MigrationError> {
        let mut expected = 0;
        for step in &self.steps {
            if step.source_version() != expected {
                return Err(MigrationError::BrokenChain {
                    expected,
                    found: step.source_version(),
                });
            }
            expected = step.target_version();
        }
        Ok(Migrator {
            steps: self.steps,
            config: self.config,
        })
    }
}
