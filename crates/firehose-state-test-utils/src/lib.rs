//! Testing utilities for the firehose-state workspace
//!
//! Shared fixtures for recorded delivery stream state at each schema version.

#![allow(missing_docs)]

use firehose_state::{AttributeBag, InstanceState};

pub const ROLE_ARN: &str = "arn:aws:iam::somenumber:role/tf_acctest_4271506651559170635";
pub const BUCKET_ARN: &str = "arn:aws:s3:::tf-test-bucket";
pub const LAMBDA_ARN: &str = "arn:aws:lambda:us-west-2:666:function:aws_kinesis_firehose_delivery_stream_test_rvab6";
pub const STREAM_ARN: &str = "arn:aws:firehose:us-west-2:666:deliverystream/terraform-kinesis-firehose-test";

/// Prefix of the first processor's parameter list at version 1
pub const PROCESSOR_PARAMETERS: &str =
    "extended_s3_configuration.0.processing_configuration.0.processors.0.parameters";

pub fn bag(pairs: &[(&str, &str)]) -> AttributeBag {
    pairs.iter().copied().collect()
}

pub fn state(schema_version: i64, pairs: &[(&str, &str)]) -> InstanceState {
    InstanceState::new("i-abc123", schema_version, bag(pairs))
}

/// Version 0 record with every legacy S3 field set
pub fn v0_full() -> AttributeBag {
    bag(&[
        ("role_arn", ROLE_ARN),
        ("s3_bucket_arn", BUCKET_ARN),
        ("s3_buffer_interval", "400"),
        ("s3_buffer_size", "10"),
        ("s3_data_compression", "GZIP"),
    ])
}

/// Version 0 record with only the required fields
pub fn v0_required() -> AttributeBag {
    bag(&[("role_arn", ROLE_ARN), ("s3_bucket_arn", BUCKET_ARN)])
}

/// Version 1 record with a plain S3 block and logging options
pub fn v1_s3() -> AttributeBag {
    bag(&[
        ("destination", "s3"),
        ("s3_configuration.#", "1"),
        ("s3_configuration.0.bucket_arn", "arn:aws:s3:::tf-test-bucket-7748474670850130673"),
        ("s3_configuration.0.buffer_interval", "300"),
        ("s3_configuration.0.buffer_size", "5"),
        ("s3_configuration.0.cloudwatch_logging_options.#", "1"),
        ("s3_configuration.0.cloudwatch_logging_options.2513562885.enabled", "true"),
        ("s3_configuration.0.cloudwatch_logging_options.2513562885.log_group_name", "groupname"),
        ("s3_configuration.0.cloudwatch_logging_options.2513562885.log_stream_name", "streamname"),
        ("s3_configuration.0.compression_format", "UNCOMPRESSED"),
        ("s3_configuration.0.kms_key_arn", "kmskeyarn"),
        ("s3_configuration.0.prefix", "s3prefix"),
        ("s3_configuration.0.role_arn", "arn:aws:iam::666:role/tf_acctest_firehose_delivery_role_7748474670850130673"),
    ])
}

/// Version 1 record with a Lambda processor described by parameter pairs
pub fn v1_processors() -> AttributeBag {
    let mut bag = v1_extended_base();
    let p = PROCESSOR_PARAMETERS;
    bag.insert(format!("{p}.#"), "2");
    bag.insert(format!("{p}.0.parameter_name"), "LambdaArn");
    bag.insert(format!("{p}.0.parameter_value"), LAMBDA_ARN);
    bag.insert(format!("{p}.1.parameter_name"), "NumberOfRetries");
    bag.insert(format!("{p}.1.parameter_value"), "3");
    bag
}

/// Expected version 2 form of [`v1_processors`]
pub fn v2_processors() -> AttributeBag {
    let mut bag = v1_extended_base();
    let p = PROCESSOR_PARAMETERS;
    bag.insert(format!("{p}.lambda_arn"), LAMBDA_ARN);
    bag.insert(format!("{p}.number_of_retries"), "3");
    bag
}

fn v1_extended_base() -> AttributeBag {
    bag(&[
        ("extended_s3_configuration.#", "1"),
        ("extended_s3_configuration.0.bucket_arn", "arn:aws:s3:::tf-test-bucket-4747185083350722827"),
        ("extended_s3_configuration.0.buffer_interval", "300"),
        ("extended_s3_configuration.0.buffer_size", "5"),
        ("extended_s3_configuration.0.compression_format", "UNCOMPRESSED"),
        ("extended_s3_configuration.0.kms_key_arn", "kmskeyarn"),
        ("extended_s3_configuration.0.prefix", "s3prefix"),
        ("extended_s3_configuration.0.processing_configuration.#", "1"),
        ("extended_s3_configuration.0.processing_configuration.0.enabled", "false"),
        ("extended_s3_configuration.0.processing_configuration.0.processors.#", "1"),
        ("extended_s3_configuration.0.processing_configuration.0.processors.0.type", "Lambda"),
        ("extended_s3_configuration.0.role_arn", "arn:aws:iam::666:role/tf_acctest_firehose_delivery_role_4747185083350722827"),
    ])
}

/// Version 1 record holding nothing but orphaned parameter values
pub fn v1_orphans() -> AttributeBag {
    bag(&[
        ("extended_s3_configuration.0.processing_configuration.#", "5"),
        ("extended_s3_configuration.0.processing_configuration.1.processors.0.parameters.0.parameter_value", LAMBDA_ARN),
        ("extended_s3_configuration.0.processing_configuration.2.processors.0.parameters.1.parameter_value", "3"),
    ])
}
