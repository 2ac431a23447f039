//! Test context for service-level integration tests.

use crate::{
    database::Db,
    domain::{
        accounts::PgAccountsService,
        carts::PgCartsService,
        catalog::{PgCatalogService, export::{CatalogExporter, ExportPaths}},
        orders::{PgCheckoutService, PgOrdersService},
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub accounts: PgAccountsService,
    pub carts: PgCartsService,
    pub catalog: PgCatalogService,
    pub checkout: PgCheckoutService,
    pub orders: PgOrdersService,
    pub export_paths: ExportPaths,
    // Held so the export directory outlives the test.
    _export_dir: tempfile::TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let export_dir = tempfile::tempdir().expect("Failed to create export directory");
        let export_paths = ExportPaths {
            primary: export_dir.path().join("products.json"),
            fallbacks: vec![export_dir.path().join("static/products.json")],
        };

        let exporter = CatalogExporter::shared(db.clone(), export_paths.clone());

        Self {
            accounts: PgAccountsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            catalog: PgCatalogService::new(db.clone(), exporter),
            checkout: PgCheckoutService::new(db.clone()),
            orders: PgOrdersService::new(db),
            export_paths,
            db: test_db,
            _export_dir: export_dir,
        }
    }
}
