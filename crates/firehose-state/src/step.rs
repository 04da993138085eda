//! Migration step trait
//!
//! A [`MigrationStep`] moves a bag forward exactly one schema version.
//! Steps are chained by the [`Migrator`](crate::Migrator).

use std::fmt::Debug;

use crate::bag::AttributeBag;
use crate::config::MigrationConfig;
use crate::error::MigrationError;

/// One schema version transition over a flattened bag
///
/// # Contract
/// - An empty bag is returned unchanged
/// - Keys the step does not recognize pass through unchanged
/// - On error the bag is left as it was on entry
pub trait MigrationStep: Send + Sync + Debug {
    /// Version this step reads
    fn source_version(&self) -> i64;

    /// Version this step writes
    #[inline]
    fn target_version(&self) -> i64 {
        self.source_version() + 1
    }

    /// Describe the transition
    fn describe(&self) -> String;

    /// Rewrite the bag in place
    ///
    /// # Errors
    /// Returns error if the bag cannot be represented at the target version
    fn apply(
        &self,
        bag: &mut AttributeBag,
        config: &MigrationConfig,
    ) -> Result<StepReport, MigrationError>;
}

/// Counters describing what a step did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Version the step read
    pub source_version: i64,
    /// Keys created with no counterpart in the input
    pub keys_added: usize,
    /// Keys written under a new name
    pub keys_moved: usize,
    /// Keys removed without a replacement
    pub keys_dropped: usize,
    /// Parameter pairs turned into named fields
    pub parameters_converted: usize,
    /// Parameter values dropped because their name key was missing
    pub orphans_dropped: usize,
}

impl StepReport {
    /// Empty report for a step
    #[inline]
    #[must_use]
    pub fn new(source_version: i64) -> Self {
        Self {
            source_version,
            ..Self::default()
        }
    }

    /// Check if the step left the bag untouched
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.keys_added == 0
            && self.keys_moved == 0
            && self.keys_dropped == 0
            && self.parameters_converted == 0
            && self.orphans_dropped == 0
    }
}
