//! Version 1 → 2: `s3_configuration` becomes `extended_s3_configuration`
//!
//! Processor parameters move from positional name/value pairs to named
//! fields:
//!
//! ```text
//! …processors.0.parameters.#                      = 1
//! …processors.0.parameters.0.parameter_name       = LambdaArn
//! …processors.0.parameters.0.parameter_value      = arn:…
//! ```
//!
//! becomes
//!
//! ```text
//! …processors.0.parameters.lambda_arn             = arn:…
//! ```

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::bag::AttributeBag;
use crate::config::MigrationConfig;
use crate::error::MigrationError;
use crate::parameter::{ProcessorParameter, UnknownParameter};
use crate::path::{AttributePath, Segment};
use crate::pattern::KeyPattern;
use crate::step::{MigrationStep, StepReport};
use crate::steps::v0_to_v1::S3_CONFIGURATION;

/// Namespace of the S3 block from version 2 on
pub const EXTENDED_S3_CONFIGURATION: &str = "extended_s3_configuration";

const PROCESSING_CONFIGURATION: &str = "processing_configuration";
const PARAMETER_NAME: &str = "parameter_name";
const PARAMETER_VALUE: &str = "parameter_value";

static PARAMETER_NAMES: Lazy<KeyPattern> = Lazy::new(|| {
    KeyPattern::new(&format!("{}.*.{PARAMETER_NAME}", parameters_template()))
        .expect("parameter name pattern is valid")
});

static PARAMETER_VALUES: Lazy<KeyPattern> = Lazy::new(|| {
    KeyPattern::new(&format!("{}.*.{PARAMETER_VALUE}", parameters_template()))
        .expect("parameter value pattern is valid")
});

static PARAMETER_COUNTS: Lazy<KeyPattern> = Lazy::new(|| {
    KeyPattern::new(&format!("{}.#", parameters_template()))
        .expect("parameter count pattern is valid")
});

fn parameters_template() -> String {
    format!("{EXTENDED_S3_CONFIGURATION}.*.{PROCESSING_CONFIGURATION}.*.processors.*.parameters")
}

/// Renames the S3 block and converts processor parameter pairs
#[derive(Debug, Clone)]
pub struct ExtendS3Configuration {
    from: AttributePath,
    to: AttributePath,
}

impl ExtendS3Configuration {
    /// Step with the standard namespaces
    #[must_use]
    pub fn new() -> Self {
        Self {
            from: AttributePath::field(S3_CONFIGURATION),
            to: AttributePath::field(EXTENDED_S3_CONFIGURATION),
        }
    }

    /// Move every key under the old namespace onto the new one
    fn rename_namespace(&self, bag: &mut AttributeBag, report: &mut StepReport) {
        for key in bag.keys_under(&self.from) {
            let Some(new_key) = self.from.rebase_key(&key, &self.to) else {
                continue;
            };
            let Some(value) = bag.remove(&key) else {
                continue;
            };
            if bag.insert(new_key.as_str(), value).is_some() {
                warn!(key = %new_key, "renamed attribute replaced an existing value");
            }
            report.keys_moved += 1;
        }
    }

    /// Replace each name/value pair with a named field
    fn convert_parameters(
        bag: &mut AttributeBag,
        report: &mut StepReport,
    ) -> Result<(), MigrationError> {
        for name_key in bag.keys_matching(&PARAMETER_NAMES) {
            let Some((entry, list)) = parameter_entry(&name_key) else {
                continue;
            };
            let Some(name) = bag.get(&name_key) else {
                continue;
            };
            let parameter: ProcessorParameter =
                name.parse().map_err(|UnknownParameter(name)| {
                    MigrationError::UnrecognizedParameterName {
                        name,
                        key: name_key.clone(),
                    }
                })?;

            let value_key = entry.child(PARAMETER_VALUE).to_string();
            let field_key = list.child(parameter.field_name()).to_string();
            bag.remove(&name_key);
            match bag.remove(&value_key) {
                Some(value) => {
                    bag.insert(field_key, value);
                    report.parameters_converted += 1;
                }
                None => {
                    warn!(key = %name_key, parameter = %parameter, "parameter name without a value; dropped");
                    report.keys_dropped += 1;
                }
            }
        }
        Ok(())
    }

    /// Drop orphaned values and the positional list counters
    ///
    /// A processing block emptied by the orphan sweep loses its count too.
    fn drop_bookkeeping(
        &self,
        bag: &mut AttributeBag,
        config: &MigrationConfig,
        report: &mut StepReport,
    ) {
        let mut emptied = BTreeSet::new();
        for value_key in bag.keys_matching(&PARAMETER_VALUES) {
            if config.warn_on_orphans {
                let beyond_count = parameter_entry(&value_key)
                    .and_then(|(entry, list)| {
                        let Segment::Index(index) = entry.last()? else {
                            return None;
                        };
                        let declared = bag.get(&list.count().to_string())?.parse::<u64>().ok()?;
                        Some(*index >= declared)
                    })
                    .unwrap_or(false);
                warn!(key = %value_key, beyond_count, "dropping orphaned parameter value");
            }
            if let Some(&[block, ..]) = PARAMETER_VALUES.indices(&value_key).as_deref() {
                emptied.insert(self.to.index(block).child(PROCESSING_CONFIGURATION));
            }
            bag.remove(&value_key);
            report.orphans_dropped += 1;
        }

        for count_key in bag.keys_matching(&PARAMETER_COUNTS) {
            bag.remove(&count_key);
            report.keys_dropped += 1;
        }

        for processing in emptied {
            let count_key = processing.count().to_string();
            if bag.keys_under(&processing).iter().all(|key| *key == count_key)
                && bag.remove(&count_key).is_some()
            {
                debug!(key = %count_key, "dropping count of emptied processing block");
                report.keys_dropped += 1;
            }
        }
    }
}

impl Default for ExtendS3Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationStep for ExtendS3Configuration {
    fn source_version(&self) -> i64 {
        1
    }

    fn describe(&self) -> String {
        format!("rename {} to {} and name processor parameters", self.from, self.to)
    }

    fn apply(
        &self,
        bag: &mut AttributeBag,
        config: &MigrationConfig,
    ) -> Result<StepReport, MigrationError> {
        let mut report = StepReport::new(self.source_version());
        if bag.is_empty() {
            debug!("empty state; nothing to migrate from v1");
            return Ok(report);
        }

        // The rename must finish before pairs are scanned under the new name.
        let mut working = bag.clone();
        self.rename_namespace(&mut working, &mut report);
        Self::convert_parameters(&mut working, &mut report)?;
        self.drop_bookkeeping(&mut working, config, &mut report);

        *bag = working;
        Ok(report)
    }
}

/// Entry (`<list>.<i>`) and list (`<list>`) of a `<list>.<i>.<leaf>` key
fn parameter_entry(key: &str) -> Option<(AttributePath, AttributePath)> {
    let entry = key.parse::<AttributePath>().ok()?.parent()?;
    let list = entry.parent()?;
    Some((entry, list))
}
