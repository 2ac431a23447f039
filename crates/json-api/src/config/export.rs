//! Catalog Export Config

use std::path::PathBuf;

use clap::Args;

use globalshop_app::domain::catalog::export::ExportPaths;

/// Catalog export artifact settings.
#[derive(Debug, Args)]
pub struct ExportConfig {
    /// Where the catalog export artifact is written
    #[arg(
        long,
        env = "CATALOG_EXPORT_PATH",
        default_value = "static/products.json"
    )]
    pub export_path: PathBuf,

    /// Comma-separated fallback locations consulted when serving the artifact
    #[arg(
        long,
        env = "CATALOG_EXPORT_FALLBACKS",
        value_delimiter = ',',
        default_value = "products.json"
    )]
    pub export_fallbacks: Vec<PathBuf>,
}

impl ExportConfig {
    #[must_use]
    pub fn export_paths(&self) -> ExportPaths {
        ExportPaths {
            primary: self.export_path.clone(),
            fallbacks: self.export_fallbacks.clone(),
        }
    }
}
