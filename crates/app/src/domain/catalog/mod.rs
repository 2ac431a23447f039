//! Catalog

pub mod errors;
pub mod export;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::CatalogServiceError;
pub use export::{CatalogExportHook, CatalogExporter, ExportPaths, MockCatalogExportHook};
pub use service::*;
