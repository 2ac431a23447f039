//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService},
        carts::{CartsService, PgCartsService},
        catalog::{
            CatalogService, PgCatalogService,
            export::{CatalogExporter, ExportPaths},
        },
        orders::{CheckoutService, OrdersService, PgCheckoutService, PgOrdersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub carts: Arc<dyn CartsService>,
    pub catalog: Arc<dyn CatalogService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub orders: Arc<dyn OrdersService>,
    pub export_paths: ExportPaths,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        export_paths: ExportPaths,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);
        let exporter = CatalogExporter::shared(db.clone(), export_paths.clone());

        Ok(Self {
            accounts: Arc::new(PgAccountsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            catalog: Arc::new(PgCatalogService::new(db.clone(), exporter)),
            checkout: Arc::new(PgCheckoutService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db)),
            export_paths,
        })
    }
}
