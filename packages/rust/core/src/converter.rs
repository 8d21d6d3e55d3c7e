//! Record → JSON-LD document converter.
//!
//! Builds the base node from the record, enriches it with the publisher and
//! images, maps every configured field through the property resolver, and
//! finally regroups flat address/geo properties. Every entity reference met
//! while mapping fields is appended to a caller-owned reference list.

use serde_json::{Map, Value, json};
use tracing::{debug, instrument, warn};

use schemald_shared::{Document, ImageSize, PropertyValue, Record, RecordId, Result};

use crate::context::{SCHEMA_CONTEXT, collapse, relative_to_context};
use crate::excerpt::{self, RecordContext};
use crate::mapper::FieldMapper;
use crate::post_process;
use crate::resolve::{EntityResolver, MediaResolver, PropertyResolver, SettingsReader};

/// Timestamp format for `datePublished` / `dateModified` (UTC, minute precision).
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Converts records to JSON-LD documents using injected collaborators.
///
/// Holds no per-call state: the reference list and record context are passed
/// in, so one converter can serve concurrent calls.
pub struct Converter<'a> {
    mapper: FieldMapper,
    settings: &'a dyn SettingsReader,
    entities: &'a dyn EntityResolver,
    properties: &'a dyn PropertyResolver,
    media: &'a dyn MediaResolver,
}

impl<'a> Converter<'a> {
    pub fn new(
        mapper: FieldMapper,
        settings: &'a dyn SettingsReader,
        entities: &'a dyn EntityResolver,
        properties: &'a dyn PropertyResolver,
        media: &'a dyn MediaResolver,
    ) -> Self {
        Self {
            mapper,
            settings,
            entities,
            properties,
            media,
        }
    }

    /// Convert `record`, appending referenced entity URIs to `references`.
    pub fn convert(&self, record: &Record, references: &mut Vec<String>) -> Result<Document> {
        let mut context = RecordContext::new();
        self.convert_in(&mut context, record, references)
    }

    /// Convert `record` when the caller has no use for the references.
    pub fn convert_detached(&self, record: &Record) -> Result<Document> {
        self.convert(record, &mut Vec::new())
    }

    /// Convert `record` using the caller's record context for excerpt lookup.
    ///
    /// Whatever record is current in `context` is current again on return.
    #[instrument(skip_all, fields(record_id = %record.id, kind = record.kind.as_str()))]
    pub fn convert_in(
        &self,
        context: &mut RecordContext,
        record: &Record,
        references: &mut Vec<String>,
    ) -> Result<Document> {
        let descriptor = self.mapper.descriptor(&record.kind);
        let references_before = references.len();

        let mut document = Document::new();
        document.insert("@context".into(), json!(SCHEMA_CONTEXT));
        document.insert("@id".into(), json!(self.entities.uri(record.id)?));
        document.insert("@type".into(), json!(descriptor.type_label));
        document.insert("headline".into(), json!(record.title));
        document.insert(
            "description".into(),
            json!(excerpt::excerpt(context, record)),
        );
        if let Some(author) = record.author.as_deref().filter(|a| !a.is_empty()) {
            document.insert(
                "author".into(),
                json!({ "@type": "Person", "name": author }),
            );
        }
        document.insert(
            "datePublished".into(),
            json!(record.date_published.format(DATE_FORMAT).to_string()),
        );
        document.insert(
            "dateModified".into(),
            json!(record.date_modified.format(DATE_FORMAT).to_string()),
        );

        if let Some(publisher) = self.publisher() {
            document.insert("publisher".into(), publisher);
        }

        let images = self.media.image_urls(record.id)?;
        if !images.is_empty() {
            document.insert(
                "image".into(),
                collapse(images.into_iter().map(Value::String).collect()),
            );
        }

        for mapping in &descriptor.fields {
            let values = self.properties.resolve(record.id, &mapping.field_key)?;
            if values.is_empty() {
                continue;
            }

            let mapped = values
                .into_iter()
                .map(|value| map_value(value, references))
                .collect();
            document.insert(
                relative_to_context(&mapping.predicate).to_string(),
                collapse(mapped),
            );
        }

        let document = post_process::apply(document);

        debug!(
            keys = document.len(),
            references = references.len() - references_before,
            "record converted"
        );

        Ok(document)
    }

    /// Convert several records in order into one shared reference list.
    pub fn convert_all<'r>(
        &self,
        records: impl IntoIterator<Item = &'r Record>,
        references: &mut Vec<String>,
    ) -> Result<Vec<Document>> {
        let mut context = RecordContext::new();
        records
            .into_iter()
            .map(|record| self.convert_in(&mut context, record, references))
            .collect()
    }

    /// The `publisher` node, or `None` when unset or unresolvable.
    fn publisher(&self) -> Option<Value> {
        let id = self.settings.publisher_id()?;

        match self.resolve_publisher(id) {
            Ok(publisher) => Some(Value::Object(publisher)),
            Err(e) => {
                warn!(publisher_id = %id, error = %e, "skipping publisher");
                None
            }
        }
    }

    fn resolve_publisher(&self, id: RecordId) -> Result<Map<String, Value>> {
        let type_label = self.entities.type_label(id)?;

        let mut publisher = Map::new();
        publisher.insert("@type".into(), json!(relative_to_context(&type_label)));
        if let Some(name) = self.entities.name(id)? {
            publisher.insert("name".into(), json!(name));
        }
        if let Some(logo) = self.media.thumbnail_url(id, ImageSize::Full)? {
            publisher.insert("logo".into(), json!({ "url": logo }));
        }

        Ok(publisher)
    }
}

/// Map one resolved value, recording entity references.
fn map_value(value: PropertyValue, references: &mut Vec<String>) -> Value {
    match value {
        PropertyValue::EntityReference(uri) => {
            let node = json!({ "@id": uri });
            references.push(uri);
            node
        }
        PropertyValue::Scalar(scalar) => json!(relative_to_context(&scalar)),
    }
}
