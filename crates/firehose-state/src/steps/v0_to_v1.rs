//! Version 0 → 1: legacy top-level S3 fields become `s3_configuration.0`

use tracing::debug;

use crate::bag::AttributeBag;
use crate::config::MigrationConfig;
use crate::error::MigrationError;
use crate::path::AttributePath;
use crate::step::{MigrationStep, StepReport};

/// Namespace of the single S3 block written at version 1
pub const S3_CONFIGURATION: &str = "s3_configuration";

/// Top-level field moved into the nested block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRename {
    /// Key at version 0
    pub source: &'static str,
    /// Leaf name inside the block
    pub target: &'static str,
    /// Required fields move whenever present; optional ones only when non-empty
    pub required: bool,
}

impl FieldRename {
    const fn required(source: &'static str, target: &'static str) -> Self {
        Self {
            source,
            target,
            required: true,
        }
    }

    const fn optional(source: &'static str, target: &'static str) -> Self {
        Self {
            source,
            target,
            required: false,
        }
    }
}

/// Fields of the legacy flat S3 destination
pub const LEGACY_S3_FIELDS: &[FieldRename] = &[
    FieldRename::required("role_arn", "role_arn"),
    FieldRename::required("s3_bucket_arn", "bucket_arn"),
    FieldRename::optional("s3_buffer_size", "buffer_size"),
    FieldRename::optional("s3_data_compression", "compression_format"),
    FieldRename::optional("s3_buffer_interval", "buffer_interval"),
    FieldRename::optional("s3_prefix", "prefix"),
];

/// Promotes the legacy flat S3 fields into a one-element nested block
#[derive(Debug, Clone)]
pub struct PromoteLegacyS3 {
    namespace: AttributePath,
    fields: &'static [FieldRename],
}

impl PromoteLegacyS3 {
    /// Step with the standard field table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            namespace: AttributePath::field(S3_CONFIGURATION),
            fields: LEGACY_S3_FIELDS,
        }
    }
}

impl Default for PromoteLegacyS3 {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationStep for PromoteLegacyS3 {
    fn source_version(&self) -> i64 {
        0
    }

    fn describe(&self) -> String {
        format!("promote legacy S3 fields into {}.0", self.namespace)
    }

    fn apply(
        &self,
        bag: &mut AttributeBag,
        _config: &MigrationConfig,
    ) -> Result<StepReport, MigrationError> {
        let mut report = StepReport::new(self.source_version());
        if bag.is_empty() {
            debug!("empty state; nothing to migrate from v0");
            return Ok(report);
        }

        bag.insert_path(&self.namespace.count(), "1");
        report.keys_added += 1;

        let block = self.namespace.index(0);
        for field in self.fields {
            let value = if field.required {
                bag.get(field.source)
            } else {
                bag.get_non_empty(field.source)
            };
            let moved = match value.map(str::to_owned) {
                Some(value) => {
                    bag.insert_path(&block.child(field.target), value);
                    true
                }
                None => false,
            };

            // Source keys never survive, migrated or not.
            if bag.remove(field.source).is_some() {
                if moved {
                    report.keys_moved += 1;
                } else {
                    report.keys_dropped += 1;
                }
            }
        }

        Ok(report)
    }
}
