//! Record-to-JSON-LD conversion for schemald.
//!
//! The [`converter::Converter`] turns a content record into a schema.org
//! JSON-LD node using injected collaborators ([`resolve`]), then applies the
//! fixed [`post_process`] regrouping. [`catalog::Catalog`] is an in-memory
//! implementation of every collaborator.

pub mod catalog;
pub mod context;
pub mod converter;
pub mod excerpt;
pub mod mapper;
pub mod post_process;
pub mod resolve;
pub mod uri;

pub use catalog::{Catalog, CatalogEntry};
pub use context::{SCHEMA_CONTEXT, relative_to_context};
pub use converter::Converter;
pub use excerpt::{RecordContext, RecordScope};
pub use mapper::FieldMapper;
pub use resolve::{EntityResolver, MediaResolver, PropertyResolver, SettingsReader};
pub use uri::DatasetUris;
