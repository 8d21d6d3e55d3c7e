//! Entity URI building from the dataset settings.
//!
//! Entities without an explicit URI get one under the dataset:
//! `{dataset_uri}/{entity_base_path}/{slug}`.

use tracing::debug;
use url::Url;

use schemald_shared::{Result, SchemaldError, Settings};

/// Default delimiter between slug words.
pub const SLUG_DELIMITER: char = '_';

/// Build an ASCII URI path segment from a title.
///
/// Letters and digits are transliterated to ASCII and lowercased. ASCII
/// punctuation is dropped. Every other character (whitespace, `_`, `-`,
/// invisible or non-ASCII symbols) becomes one `delimiter`; runs are kept and
/// only the ends are trimmed.
pub fn slugify(title: &str, delimiter: char) -> String {
    let mut slug = String::with_capacity(title.len());

    for c in title.chars() {
        if c.is_alphanumeric() {
            let ascii = deunicode::deunicode_char(c).unwrap_or_default();
            slug.extend(
                ascii
                    .chars()
                    .filter(char::is_ascii_alphanumeric)
                    .map(|a| a.to_ascii_lowercase()),
            );
        } else if c.is_ascii_punctuation() && c != '_' && c != '-' {
            continue;
        } else {
            slug.push(delimiter);
        }
    }

    slug.trim_matches(delimiter).to_string()
}

/// Builds entity URIs under the configured dataset.
#[derive(Debug, Clone)]
pub struct DatasetUris {
    dataset: Url,
    base_path: Vec<String>,
}

impl DatasetUris {
    /// Requires `dataset_uri` to be set and hierarchical.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let raw = settings
            .dataset_uri
            .as_deref()
            .ok_or_else(|| SchemaldError::config("dataset_uri is not configured"))?;

        let dataset = Url::parse(raw)
            .map_err(|e| SchemaldError::config(format!("invalid dataset_uri {raw:?}: {e}")))?;
        if dataset.cannot_be_a_base() {
            return Err(SchemaldError::config(format!(
                "dataset_uri {raw:?} cannot hold entity paths"
            )));
        }

        let base_path = settings
            .entity_base_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Ok(Self { dataset, base_path })
    }

    /// URI for an entity titled `title`.
    pub fn entity_uri(&self, title: &str) -> Result<String> {
        let slug = slugify(title, SLUG_DELIMITER);
        if slug.is_empty() {
            return Err(SchemaldError::validation(format!(
                "title {title:?} produces an empty slug"
            )));
        }

        let mut url = self.dataset.clone();
        url.path_segments_mut()
            .map_err(|()| SchemaldError::config("dataset_uri cannot hold entity paths"))?
            .pop_if_empty()
            .extend(&self.base_path)
            .push(&slug);

        debug!(%url, "built entity uri");
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(dataset: &str, base: &str) -> Settings {
        Settings {
            dataset_uri: Some(dataset.into()),
            entity_base_path: base.into(),
            ..Settings::default()
        }
    }

    #[test]
    fn slugify_simple() {
        assert_eq!(slugify("David Riccitelli", '_'), "david_riccitelli");
        assert_eq!(slugify("David Luigi Riccitelli", '_'), "david_luigi_riccitelli");
        assert_eq!(slugify("David Riccitelli", '-'), "david-riccitelli");
    }

    #[test]
    fn slugify_drops_punctuation() {
        assert_eq!(slugify("David (Riccitelli)", '_'), "david_riccitelli");
        assert_eq!(
            slugify("David (Luigi) Riccitelli", '-'),
            "david-luigi-riccitelli"
        );
        assert_eq!(slugify("  Hello, World!  ", '_'), "hello_world");
    }

    #[test]
    fn slugify_transliterates_to_ascii() {
        let slug = slugify("Ekkehard Böhmer", '_');
        assert_eq!(slug, "ekkehard_bohmer");
        assert!(slug.is_ascii());
    }

    #[test]
    fn slugify_maps_invisible_characters_to_delimiter() {
        let slug = slugify("Mozarts\u{feff} Geburtshaus", '_');
        assert_eq!(slug, "mozarts__geburtshaus");
        assert!(slug.is_ascii());
    }

    #[test]
    fn entity_uri_under_dataset() {
        let uris = DatasetUris::from_settings(&settings("http://data.example.org/blog", "entity"))
            .expect("valid settings");
        assert_eq!(
            uris.entity_uri("Acme Corp.").unwrap(),
            "http://data.example.org/blog/entity/acme_corp"
        );
    }

    #[test]
    fn entity_uri_with_trailing_slash_and_nested_base() {
        let uris = DatasetUris::from_settings(&settings("http://data.example.org/blog/", "/kb/things/"))
            .expect("valid settings");
        assert_eq!(
            uris.entity_uri("Rome").unwrap(),
            "http://data.example.org/blog/kb/things/rome"
        );
    }

    #[test]
    fn entity_uri_is_ascii() {
        let uris = DatasetUris::from_settings(&settings("http://data.example.org", "entity"))
            .expect("valid settings");
        assert_eq!(
            uris.entity_uri("Böhmer").unwrap(),
            "http://data.example.org/entity/bohmer"
        );
    }

    #[test]
    fn missing_dataset_is_config_error() {
        let err = DatasetUris::from_settings(&Settings::default()).unwrap_err();
        assert!(err.to_string().contains("dataset_uri"));
    }

    #[test]
    fn empty_slug_rejected() {
        let uris = DatasetUris::from_settings(&settings("http://data.example.org", "entity"))
            .expect("valid settings");
        assert!(uris.entity_uri("(!)").is_err());
    }
}
