//! Built-in migration steps for delivery stream state

mod v0_to_v1;
mod v1_to_v2;

pub use v0_to_v1::{FieldRename, PromoteLegacyS3, LEGACY_S3_FIELDS, S3_CONFIGURATION};
pub use v1_to_v2::{ExtendS3Configuration, EXTENDED_S3_CONFIGURATION};
