//! Core domain types for records and their structured documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A JSON-LD node as an insertion-ordered key/value map.
pub type Document = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// RecordId
// ---------------------------------------------------------------------------

/// Numeric identifier of a record or entity in the content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

/// Declared subtype of a record. Only `post` is distinguished.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordKind {
    /// A blog post.
    Post,
    /// Any other subtype (page, entity, custom types), kept verbatim.
    Other(String),
}

impl RecordKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Post => "post",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for RecordKind {
    fn from(value: String) -> Self {
        if value == "post" {
            Self::Post
        } else {
            Self::Other(value)
        }
    }
}

impl From<&str> for RecordKind {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<RecordKind> for String {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Post => "post".into(),
            RecordKind::Other(name) => name,
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A content item owned by the content store. Never mutated by the converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub kind: RecordKind,
    pub title: String,
    /// Raw HTML body.
    #[serde(default)]
    pub body: String,
    /// Hand-written excerpt; when absent one is derived from the body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Author display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub date_published: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_urls: Vec<String>,
}

// ---------------------------------------------------------------------------
// Property values and type descriptors
// ---------------------------------------------------------------------------

/// A single resolved value for a `(record, field key)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    /// A plain literal (text, number, date, or a namespaced IRI).
    Scalar(String),
    /// A reference to another entity, by URI.
    EntityReference(String),
}

/// Pairs a source field key with the predicate it is published under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Key handed to the property resolver.
    pub field_key: String,
    /// Predicate IRI, e.g. `http://schema.org/mentions` (or already relative).
    pub predicate: String,
}

impl FieldMapping {
    pub fn new(field_key: impl Into<String>, predicate: impl Into<String>) -> Self {
        Self {
            field_key: field_key.into(),
            predicate: predicate.into(),
        }
    }
}

/// The output `@type` and ordered field mappings for one record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub type_label: String,
    pub fields: Vec<FieldMapping>,
}

/// Size hint passed to the thumbnail resolver.
///
/// Publisher logos are always requested at full size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ImageSize {
    Full,
}
