//! Application configuration for schemald.
//!
//! User config lives at `~/.schemald/schemald.toml`.
//! The `--config` flag overrides the location; missing values fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SchemaldError};
use crate::types::{FieldMapping, RecordId};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "schemald.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".schemald";

// ---------------------------------------------------------------------------
// Config structs (matching schemald.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Publisher and dataset settings.
    #[serde(default)]
    pub settings: Settings,

    /// Field mappings per output type.
    #[serde(default)]
    pub schema: SchemaConfig,
}

/// `[settings]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Entity that publishes every document. Unset until setup is complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_id: Option<RecordId>,

    /// Base URI of the linked-data dataset (e.g. `http://data.example.org/blog`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_uri: Option<String>,

    /// Path segment under the dataset URI where entities live.
    #[serde(default = "default_entity_base_path")]
    pub entity_base_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            publisher_id: None,
            dataset_uri: None,
            entity_base_path: default_entity_base_path(),
        }
    }
}

fn default_entity_base_path() -> String {
    "entity".into()
}

/// `[schema]` section: ordered field mappings for each output type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Mappings applied to `post` records (`BlogPosting`).
    #[serde(default)]
    pub blog_posting: Vec<FieldMapping>,

    /// Mappings applied to every other record (`Article`).
    #[serde(default)]
    pub article: Vec<FieldMapping>,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.schemald/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SchemaldError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.schemald/schemald.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SchemaldError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        SchemaldError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_settings(&config.settings)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| SchemaldError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SchemaldError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SchemaldError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check the dataset URI and entity base path.
pub fn validate_settings(settings: &Settings) -> Result<()> {
    if let Some(uri) = settings.dataset_uri.as_deref() {
        let parsed = Url::parse(uri)
            .map_err(|e| SchemaldError::config(format!("invalid dataset_uri {uri:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SchemaldError::config(format!(
                "dataset_uri must be http or https, got {:?}",
                parsed.scheme()
            )));
        }
    }

    if settings.entity_base_path.trim_matches('/').is_empty() {
        return Err(SchemaldError::config("entity_base_path must not be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("entity_base_path"));
        assert!(!toml_str.contains("publisher_id"));
    }

    #[test]
    fn settings_without_reader_are_not_written() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).expect("serialize");
        for key in ["language", "key =", "skip_wizard"] {
            assert!(!toml_str.contains(key), "{key} written to config");
        }

        let legacy = r#"
[settings]
language = "en"
skip_wizard = true
"#;
        let config: AppConfig = toml::from_str(legacy).expect("old keys are ignored");
        assert_eq!(config.settings.entity_base_path, "entity");
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.settings.entity_base_path, "entity");
        assert!(parsed.settings.publisher_id.is_none());
    }

    #[test]
    fn config_with_schema() {
        let toml_str = r#"
[settings]
publisher_id = 10
dataset_uri = "http://data.example.org/blog"

[[schema.blog_posting]]
field_key = "wl_mentions"
predicate = "http://schema.org/mentions"

[[schema.article]]
field_key = "wl_street"
predicate = "http://schema.org/streetAddress"

[[schema.article]]
field_key = "wl_city"
predicate = "http://schema.org/addressLocality"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.settings.publisher_id, Some(RecordId(10)));
        assert_eq!(config.schema.blog_posting.len(), 1);
        assert_eq!(config.schema.article[1].field_key, "wl_city");
        assert!(validate_settings(&config.settings).is_ok());
    }

    #[test]
    fn invalid_dataset_uri_rejected() {
        let settings = Settings {
            dataset_uri: Some("not a uri".into()),
            ..Settings::default()
        };
        assert!(validate_settings(&settings).is_err());

        let settings = Settings {
            dataset_uri: Some("ftp://data.example.org".into()),
            ..Settings::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn empty_entity_base_path_rejected() {
        let settings = Settings {
            entity_base_path: "/".into(),
            ..Settings::default()
        };
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn config_fixture_validates() {
        let config = load_config_from(Path::new("../../../fixtures/config/schemald.toml"))
            .expect("load fixture config");
        assert_eq!(config.settings.publisher_id, Some(RecordId(100)));
        assert_eq!(config.schema.blog_posting.len(), 2);
    }
}
