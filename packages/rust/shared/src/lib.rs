//! Shared types, error model, and configuration for schemald.
//!
//! This crate is the foundation depended on by all other schemald crates.
//! It provides:
//! - [`SchemaldError`], the unified error type
//! - Domain types ([`Record`], [`PropertyValue`], [`FieldMapping`], [`Document`])
//! - Configuration ([`AppConfig`], [`Settings`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, SchemaConfig, Settings, config_dir, config_file_path, init_config, load_config,
    load_config_from, validate_settings,
};
pub use error::{Result, SchemaldError};
pub use types::{
    Document, FieldMapping, ImageSize, PropertyValue, Record, RecordId, RecordKind,
    TypeDescriptor,
};
