use firehose_state::{MigrationConfig, MigrationError, Migrator, CURRENT_SCHEMA_VERSION};
use firehose_state_test_utils::*;
use pretty_assertions::assert_eq;

fn migrate(version: i64, mut attributes: firehose_state::AttributeBag) -> firehose_state::AttributeBag {
    Migrator::new().migrate(version, &mut attributes).unwrap();
    attributes
}

#[test]
fn test_v0_to_v2() {
    let migrated = migrate(0, v0_full());
    assert_eq!(
        migrated,
        bag(&[
            ("extended_s3_configuration.#", "1"),
            ("extended_s3_configuration.0.bucket_arn", BUCKET_ARN),
            ("extended_s3_configuration.0.buffer_interval", "400"),
            ("extended_s3_configuration.0.buffer_size", "10"),
            ("extended_s3_configuration.0.compression_format", "GZIP"),
            ("extended_s3_configuration.0.role_arn", ROLE_ARN),
        ])
    );
}

#[test]
fn test_v0_to_v2_required_only() {
    let migrated = migrate(0, v0_required());
    assert_eq!(
        migrated,
        bag(&[
            ("extended_s3_configuration.#", "1"),
            ("extended_s3_configuration.0.bucket_arn", BUCKET_ARN),
            ("extended_s3_configuration.0.role_arn", ROLE_ARN),
        ])
    );
}

#[test]
fn test_v0_optional_field_included_only_when_given() {
    let mut with_size = v0_required();
    with_size.insert("s3_buffer_size", "10");
    assert_eq!(
        migrate(0, with_size).get("extended_s3_configuration.0.buffer_size"),
        Some("10")
    );
    assert!(!migrate(0, v0_required()).contains_key("extended_s3_configuration.0.buffer_size"));
}

#[test]
fn test_v1_to_v2() {
    let migrated = migrate(1, v1_s3());

    let expected: firehose_state::AttributeBag = v1_s3()
        .iter()
        .map(|(key, value)| {
            let key = match key.strip_prefix("s3_configuration") {
                Some(rest) => format!("extended_s3_configuration{rest}"),
                None => key.to_string(),
            };
            (key, value.to_string())
        })
        .collect();
    assert_eq!(migrated, expected);
    assert!(migrated.keys().all(|key| !key.starts_with("s3_configuration")));
    assert_eq!(
        migrated.get("extended_s3_configuration.0.cloudwatch_logging_options.2513562885.log_group_name"),
        Some("groupname")
    );
}

#[test]
fn test_v1_to_v2_processors() {
    assert_eq!(migrate(1, v1_processors()), v2_processors());
}

#[test]
fn test_v1_to_v2_orphans() {
    assert!(migrate(1, v1_orphans()).is_empty());
}

#[test]
fn test_current_version_is_untouched() {
    let original = v1_processors();
    let mut attributes = original.clone();
    let report = Migrator::new()
        .migrate(CURRENT_SCHEMA_VERSION, &mut attributes)
        .unwrap();
    assert!(report.steps.is_empty());
    assert_eq!(attributes, original);
}

#[test]
fn test_empty_state_at_every_version() {
    let migrator = Migrator::new();
    for version in 0..=CURRENT_SCHEMA_VERSION {
        let mut attributes = bag(&[]);
        let report = migrator.migrate(version, &mut attributes).unwrap();
        assert!(attributes.is_empty(), "version {version}");
        assert!(report.is_noop());
    }
}

#[test]
fn test_absent_state() {
    assert_eq!(Migrator::new().migrate_state(None).unwrap(), None);
}

#[test]
fn test_migrate_state_stamps_current_version() {
    let migrated = Migrator::new()
        .migrate_state(Some(state(0, &[("role_arn", ROLE_ARN), ("s3_bucket_arn", BUCKET_ARN)])))
        .unwrap()
        .unwrap();
    assert_eq!(migrated.id, "i-abc123");
    assert_eq!(migrated.schema_version, CURRENT_SCHEMA_VERSION);
    assert_eq!(migrated.attributes.get("extended_s3_configuration.0.role_arn"), Some(ROLE_ARN));
}

#[test]
fn test_unsupported_versions() {
    for version in [-1, 3, 99] {
        let original = v0_full();
        let mut attributes = original.clone();
        let err = Migrator::new().migrate(version, &mut attributes).unwrap_err();
        assert_eq!(
            err,
            MigrationError::UnsupportedVersion {
                version,
                current: CURRENT_SCHEMA_VERSION
            }
        );
        assert_eq!(attributes, original);
    }
}

#[test]
fn test_unsupported_version_on_empty_state() {
    let mut attributes = bag(&[]);
    assert!(Migrator::new().migrate(-5, &mut attributes).is_err());
}

#[test]
fn test_unrecognized_parameter_fails_closed() {
    let mut original = v1_processors();
    original.insert(format!("{PROCESSOR_PARAMETERS}.1.parameter_name"), "RoleArn");
    let mut attributes = original.clone();

    let err = Migrator::new().migrate(1, &mut attributes).unwrap_err();
    match err {
        MigrationError::UnrecognizedParameterName { name, key } => {
            assert_eq!(name, "RoleArn");
            assert_eq!(key, format!("{PROCESSOR_PARAMETERS}.1.parameter_name"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(attributes, original);
}

#[test]
fn test_v0_chain_with_legacy_block_and_processors() {
    let mut attributes = v0_required();
    attributes.insert("s3_configuration.0.processing_configuration.0.processors.0.parameters.#", "1");
    attributes.insert(
        "s3_configuration.0.processing_configuration.0.processors.0.parameters.0.parameter_name",
        "LambdaArn",
    );
    attributes.insert(
        "s3_configuration.0.processing_configuration.0.processors.0.parameters.0.parameter_value",
        LAMBDA_ARN,
    );

    let migrated = migrate(0, attributes);
    assert_eq!(migrated.get(&format!("{PROCESSOR_PARAMETERS}.lambda_arn")), Some(LAMBDA_ARN));
    assert!(migrated
        .keys()
        .all(|key| !key.ends_with("parameter_name") && !key.ends_with("parameter_value")));
}

#[test]
fn test_report_counts() {
    let mut attributes = v1_processors();
    let report = Migrator::with_config(MigrationConfig::new().with_trace_attributes(false))
        .migrate(1, &mut attributes)
        .unwrap();
    assert_eq!(report.source_version, 1);
    assert_eq!(report.target_version, 2);
    assert_eq!(report.steps.len(), 1);
    assert_eq!(report.steps[0].parameters_converted, 2);
    assert_eq!(report.steps[0].orphans_dropped, 0);
}

#[test]
fn test_non_ascii_digit_index_is_not_a_parameter_pair() {
    let name_key = "extended_s3_configuration.0.processing_configuration.0.processors.0.parameters.\u{0663}.parameter_name";
    let value_key = "extended_s3_configuration.0.processing_configuration.0.processors.0.parameters.\u{0663}.parameter_value";
    let original = bag(&[(name_key, "LambdaArn"), (value_key, "arn")]);

    assert_eq!(migrate(1, original.clone()), original);
}
