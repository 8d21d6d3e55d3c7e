//! Field mapper: record kind → output type and ordered field mappings.

use schemald_shared::{FieldMapping, RecordKind, SchemaConfig, TypeDescriptor};

/// `@type` for `post` records.
pub const BLOG_POSTING: &str = "BlogPosting";

/// `@type` for every other record.
pub const ARTICLE: &str = "Article";

/// Immutable table of type descriptors, looked up by record kind.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    blog_posting: TypeDescriptor,
    article: TypeDescriptor,
}

impl FieldMapper {
    pub fn new(blog_posting: Vec<FieldMapping>, article: Vec<FieldMapping>) -> Self {
        Self {
            blog_posting: TypeDescriptor {
                type_label: BLOG_POSTING.into(),
                fields: blog_posting,
            },
            article: TypeDescriptor {
                type_label: ARTICLE.into(),
                fields: article,
            },
        }
    }

    /// The descriptor for a record kind.
    pub fn descriptor(&self, kind: &RecordKind) -> &TypeDescriptor {
        match kind {
            RecordKind::Post => &self.blog_posting,
            RecordKind::Other(_) => &self.article,
        }
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl From<&SchemaConfig> for FieldMapper {
    fn from(schema: &SchemaConfig) -> Self {
        Self::new(schema.blog_posting.clone(), schema.article.clone())
    }
}
