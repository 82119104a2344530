//! Shared types, error model, and configuration for plextags.
//!
//! This crate is the foundation depended on by all other plextags crates.
//! It provides:
//! - [`PlexTagsError`]: the unified error type
//! - Domain types ([`Tag`], [`CatalogEntry`], [`LibType`]) and the [`Catalog`] seam
//! - [`TextEncoding`]: strict decoders for CSV import
//! - Configuration ([`AppConfig`], config loading, token lookup)

pub mod catalog;
pub mod config;
pub mod encoding;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use catalog::Catalog;
pub use config::{
    AppConfig, CsvConfig, DEFAULT_SERVER_URL, LibraryConfig, ServerConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from, resolve_token,
};
pub use encoding::TextEncoding;
pub use error::{PlexTagsError, Result};
pub use types::{CatalogEntry, LibType, Tag};
