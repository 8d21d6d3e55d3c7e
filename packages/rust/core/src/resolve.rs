//! Collaborator interfaces the converter depends on.
//!
//! Implementations live outside the converter: the content store, the
//! settings store, the media library. [`crate::catalog::Catalog`] provides an
//! in-memory implementation of all of them.

use schemald_shared::{ImageSize, PropertyValue, RecordId, Result, Settings};

/// Read-only access to site settings.
pub trait SettingsReader: Send + Sync {
    /// The configured publisher entity. `None` is a normal outcome.
    fn publisher_id(&self) -> Option<RecordId>;
}

/// Resolves identity information for records and entities.
pub trait EntityResolver: Send + Sync {
    /// Absolute URI used as the document `@id`.
    fn uri(&self, id: RecordId) -> Result<String>;

    /// Namespaced type label, e.g. `http://schema.org/Organization`.
    fn type_label(&self, id: RecordId) -> Result<String>;

    /// Display name, if the entity has one.
    fn name(&self, id: RecordId) -> Result<Option<String>>;
}

/// Resolves custom property values for a record.
pub trait PropertyResolver: Send + Sync {
    /// Ordered values for `field_key`. Unknown keys yield an empty list.
    fn resolve(&self, id: RecordId, field_key: &str) -> Result<Vec<PropertyValue>>;
}

/// Resolves images attached to records.
pub trait MediaResolver: Send + Sync {
    /// Ordered image URLs for the record, possibly empty.
    fn image_urls(&self, id: RecordId) -> Result<Vec<String>>;

    /// Featured image URL at the given size, if any.
    fn thumbnail_url(&self, id: RecordId, size: ImageSize) -> Result<Option<String>>;
}

impl SettingsReader for Settings {
    fn publisher_id(&self) -> Option<RecordId> {
        self.publisher_id
    }
}
