//! In-memory content store loaded from a JSON catalog file.
//!
//! Implements every collaborator trait so records can be converted without a
//! live content store (CLI runs, fixtures, tests).
//!
//! ```json
//! {
//!   "records": [
//!     {
//!       "id": 1, "kind": "post", "title": "Hello",
//!       "date_published": "2024-05-01T09:30:00Z",
//!       "date_modified": "2024-05-02T10:00:00Z",
//!       "type": "http://schema.org/Organization",
//!       "uri": "http://data.example.org/post/hello",
//!       "thumbnail_url": "https://cdn.example.org/logo.png",
//!       "properties": { "wl_mentions": [{ "kind": "entity_reference", "value": "..." }] }
//!     }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, trace};

use schemald_shared::{
    ImageSize, PropertyValue, Record, RecordId, Result, SchemaldError,
};

use crate::resolve::{EntityResolver, MediaResolver, PropertyResolver};
use crate::uri::DatasetUris;

/// Type label reported for entries that declare none.
pub const DEFAULT_TYPE_LABEL: &str = "http://schema.org/Thing";

/// One record plus the data the collaborators resolve for it.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub record: Record,
    /// Explicit `@id`; derived from the dataset settings when absent.
    #[serde(default)]
    pub uri: Option<String>,
    /// Namespaced entity type.
    #[serde(default, rename = "type")]
    pub type_label: Option<String>,
    /// Featured image, used as the publisher logo.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Custom property values keyed by field key.
    #[serde(default)]
    pub properties: HashMap<String, Vec<PropertyValue>>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    records: Vec<CatalogEntry>,
}

/// Records and entities held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<RecordId, CatalogEntry>,
    uris: Option<DatasetUris>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for entry in entries {
            let id = entry.record.id;
            if map.insert(id, entry).is_some() {
                return Err(SchemaldError::validation(format!(
                    "duplicate record id {id} in catalog"
                )));
            }
        }
        Ok(Self {
            entries: map,
            uris: None,
        })
    }

    /// Parse a catalog from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| SchemaldError::parse(format!("invalid catalog: {e}")))?;
        Self::from_entries(file.records)
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaldError::io(path, e))?;
        let catalog = Self::from_json(&content)?;
        info!(path = %path.display(), records = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Derive missing URIs from the dataset settings.
    pub fn with_dataset(mut self, uris: DatasetUris) -> Self {
        self.uris = Some(uris);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.entries.get(&id).map(|entry| &entry.record)
    }

    /// All records, ordered by id.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.values().map(|entry| &entry.record)
    }

    fn entry(&self, id: RecordId) -> Result<&CatalogEntry> {
        self.entries.get(&id).ok_or(SchemaldError::NotFound(id))
    }
}

impl EntityResolver for Catalog {
    fn uri(&self, id: RecordId) -> Result<String> {
        let entry = self.entry(id)?;
        if let Some(uri) = &entry.uri {
            return Ok(uri.clone());
        }

        match &self.uris {
            Some(uris) => uris.entity_uri(&entry.record.title),
            None => Err(SchemaldError::resolve(
                id,
                "no explicit uri and no dataset_uri configured",
            )),
        }
    }

    fn type_label(&self, id: RecordId) -> Result<String> {
        let entry = self.entry(id)?;
        Ok(entry
            .type_label
            .clone()
            .unwrap_or_else(|| DEFAULT_TYPE_LABEL.to_string()))
    }

    fn name(&self, id: RecordId) -> Result<Option<String>> {
        let title = &self.entry(id)?.record.title;
        Ok((!title.is_empty()).then(|| title.clone()))
    }
}

impl PropertyResolver for Catalog {
    fn resolve(&self, id: RecordId, field_key: &str) -> Result<Vec<PropertyValue>> {
        let values = self
            .entry(id)?
            .properties
            .get(field_key)
            .cloned()
            .unwrap_or_default();
        trace!(%id, field_key, count = values.len(), "resolved property");
        Ok(values)
    }
}

impl MediaResolver for Catalog {
    fn image_urls(&self, id: RecordId) -> Result<Vec<String>> {
        Ok(self.entry(id)?.record.media_urls.clone())
    }

    fn thumbnail_url(&self, id: RecordId, size: ImageSize) -> Result<Option<String>> {
        let url = self.entry(id)?.thumbnail_url.clone();
        debug!(%id, ?size, found = url.is_some(), "resolved thumbnail");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use schemald_shared::{RecordKind, Settings};

    use super::*;

    const CATALOG: &str = r#"{
        "records": [
            {
                "id": 1,
                "kind": "post",
                "title": "Hello",
                "date_published": "2024-05-01T09:30:00Z",
                "date_modified": "2024-05-02T10:00:00Z",
                "media_urls": ["https://cdn.example.org/a.jpg"],
                "properties": {
                    "wl_mentions": [
                        { "kind": "entity_reference", "value": "http://data.example.org/entity/acme" }
                    ]
                }
            },
            {
                "id": 100,
                "kind": "entity",
                "title": "Acme Corp",
                "type": "http://schema.org/Organization",
                "thumbnail_url": "https://cdn.example.org/acme.png",
                "date_published": "2023-01-01T00:00:00Z",
                "date_modified": "2023-01-01T00:00:00Z"
            }
        ]
    }"#;

    fn dataset() -> DatasetUris {
        DatasetUris::from_settings(&Settings {
            dataset_uri: Some("http://data.example.org".into()),
            ..Settings::default()
        })
        .expect("valid dataset")
    }

    #[test]
    fn parses_records_and_extras() {
        let catalog = Catalog::from_json(CATALOG).expect("parse catalog");
        assert_eq!(catalog.len(), 2);

        let post = catalog.record(RecordId(1)).expect("record 1");
        assert_eq!(post.kind, RecordKind::Post);
        assert_eq!(post.media_urls.len(), 1);

        let ids: Vec<_> = catalog.records().map(|r| r.id.0).collect();
        assert_eq!(ids, [1, 100]);
    }

    #[test]
    fn resolves_properties_and_unknown_keys() {
        let catalog = Catalog::from_json(CATALOG).expect("parse catalog");
        assert_eq!(catalog.resolve(RecordId(1), "wl_mentions").unwrap().len(), 1);
        assert!(catalog.resolve(RecordId(1), "wl_missing").unwrap().is_empty());
    }

    #[test]
    fn unknown_record_is_not_found() {
        let catalog = Catalog::from_json(CATALOG).expect("parse catalog");
        assert!(matches!(
            catalog.uri(RecordId(9)),
            Err(SchemaldError::NotFound(RecordId(9)))
        ));
    }

    #[test]
    fn uri_requires_dataset_when_not_explicit() {
        let catalog = Catalog::from_json(CATALOG).expect("parse catalog");
        assert!(matches!(
            catalog.uri(RecordId(100)),
            Err(SchemaldError::Resolve { .. })
        ));

        let catalog = catalog.with_dataset(dataset());
        assert_eq!(
            catalog.uri(RecordId(100)).unwrap(),
            "http://data.example.org/entity/acme_corp"
        );
    }

    #[test]
    fn entity_type_and_name() {
        let catalog = Catalog::from_json(CATALOG).expect("parse catalog");
        assert_eq!(
            catalog.type_label(RecordId(100)).unwrap(),
            "http://schema.org/Organization"
        );
        assert_eq!(catalog.type_label(RecordId(1)).unwrap(), DEFAULT_TYPE_LABEL);
        assert_eq!(catalog.name(RecordId(100)).unwrap().as_deref(), Some("Acme Corp"));
        assert_eq!(
            catalog.thumbnail_url(RecordId(100), ImageSize::Full).unwrap().as_deref(),
            Some("https://cdn.example.org/acme.png")
        );
    }

    #[test]
    fn duplicate_ids_rejected() {
        let json = r#"{ "records": [
            { "id": 1, "kind": "post", "title": "a", "date_published": "2024-01-01T00:00:00Z", "date_modified": "2024-01-01T00:00:00Z" },
            { "id": 1, "kind": "page", "title": "b", "date_published": "2024-01-01T00:00:00Z", "date_modified": "2024-01-01T00:00:00Z" }
        ] }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate record id 1"));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(SchemaldError::Parse { .. })
        ));
    }

    #[test]
    fn catalog_fixture_loads() {
        let catalog = Catalog::load(Path::new("../../../fixtures/json/catalog.fixture.json"))
            .expect("load fixture catalog");
        assert_eq!(catalog.len(), 4);
        assert!(catalog.record(RecordId(100)).is_some());
    }
}
