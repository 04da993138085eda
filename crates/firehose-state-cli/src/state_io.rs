//! Reading and writing state documents

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use firehose_state::{InstanceState, MigrationConfig};

/// Path meaning standard input/output
pub(crate) const STDIO: &str = "-";

/// Serialization of a state document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick format from a file extension, defaulting to JSON
    pub(crate) fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

pub(crate) fn parse_state(text: &str, format: Format) -> Result<InstanceState> {
    let state = match format {
        Format::Json => serde_json::from_str(text).context("invalid JSON state document")?,
        Format::Yaml => serde_yaml::from_str(text).context("invalid YAML state document")?,
    };
    Ok(state)
}

pub(crate) fn read_state(path: &Path) -> Result<InstanceState> {
    if path.as_os_str() == STDIO {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read state from stdin")?;
        return parse_state(&text, Format::Json);
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read state from {}", path.display()))?;
    parse_state(&text, Format::from_path(path))
        .with_context(|| format!("failed to parse {}", path.display()))
}

pub(crate) fn read_config(path: Option<&Path>) -> Result<MigrationConfig> {
    let Some(path) = path else {
        return Ok(MigrationConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    MigrationConfig::from_toml_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

pub(crate) fn render_state(state: &InstanceState) -> Result<String> {
    let mut text = serde_json::to_string_pretty(state).context("failed to serialize state")?;
    text.push('\n');
    Ok(text)
}

pub(crate) fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) if path.as_os_str() != STDIO => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
        }
        _ => {
            print!("{text}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firehose_state_test_utils::{state, ROLE_ARN};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(&PathBuf::from("state.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(&PathBuf::from("state.yml")), Format::Yaml);
        assert_eq!(Format::from_path(&PathBuf::from("state.json")), Format::Json);
        assert_eq!(Format::from_path(&PathBuf::from("state")), Format::Json);
    }

    #[test]
    fn parse_yaml_state() {
        let text = "id: i-abc123\nschema_version: 0\nattributes:\n  role_arn: arn:role\n";
        let parsed = parse_state(text, Format::Yaml).unwrap();
        assert_eq!(parsed.schema_version, 0);
        assert_eq!(parsed.attributes.get("role_arn"), Some("arn:role"));
    }

    #[test]
    fn parse_rejects_non_string_values() {
        let text = r#"{"id": "x", "attributes": {"count": 1}}"#;
        assert!(parse_state(text, Format::Json).is_err());
    }

    #[test]
    fn write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let original = state(1, &[("s3_configuration.0.role_arn", ROLE_ARN)]);

        write_output(Some(&path), &render_state(&original).unwrap()).unwrap();
        assert_eq!(read_state(&path).unwrap(), original);
    }

    #[test]
    fn read_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = read_state(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing.json"));
    }

    #[test]
    fn config_defaults_without_file() {
        assert_eq!(read_config(None).unwrap(), MigrationConfig::default());
    }

    #[test]
    fn config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("migrate.toml");
        fs::write(&path, "trace_attributes = false\n").unwrap();
        let config = read_config(Some(&path)).unwrap();
        assert!(!config.trace_attributes);
        assert!(config.warn_on_orphans);
    }
}
