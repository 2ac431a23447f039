//! Catalog export.
//!
//! Materializes the catalog into the `products.json` document the
//! storefront frontend consumes. Regeneration runs after every catalog
//! write, replacing the artifact atomically.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    database::Db,
    domain::catalog::{
        models::{Category, Product, ProductImage, ProductUuid},
        repository::PgCatalogRepository,
    },
};

const PLACEHOLDER_IMAGE_URL: &str = "/images/person-using-smartphone-his-auto.jpg";

const FALLBACK_DESCRIPTION: &str = "Sample text. Lorem ipsum dolor sit amet, consectetur \
     adipiscing elit nullam nunc justo sagittis suscipit.";

const FALLBACK_FULL_DESCRIPTION: &str = "Пример текста. Lorem ipsum dolor sit amet, consectetur \
     adipiscing elit, sed do eiusmod tempor incididunt ut Labore et dolore magna aliqua. Ut enim \
     ad minim veniam, quis nostrum exercitation ullamco Laboris ni si ut aliquip ex ea commodo \
     consequat.";

#[derive(Debug, Error)]
pub enum CatalogExportError {
    #[error("no readable export artifact")]
    Missing,

    #[error("storage error")]
    Sql(#[from] sqlx::Error),

    #[error("serialization error")]
    Json(#[from] serde_json::Error),

    #[error("filesystem error")]
    Io(#[from] std::io::Error),
}

/// Where the export artifact is written and where readers look for it.
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub primary: PathBuf,
    pub fallbacks: Vec<PathBuf>,
}

impl ExportPaths {
    fn candidates(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.primary.as_path()).chain(self.fallbacks.iter().map(PathBuf::as_path))
    }
}

/// Invoked by the catalog write path after each committed mutation.
#[automock]
#[async_trait]
pub trait CatalogExportHook: Send + Sync {
    async fn catalog_changed(&self);
}

pub struct CatalogExporter {
    db: Db,
    repository: PgCatalogRepository,
    paths: ExportPaths,
}

impl CatalogExporter {
    #[must_use]
    pub fn new(db: Db, paths: ExportPaths) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
            paths,
        }
    }

    #[must_use]
    pub fn shared(db: Db, paths: ExportPaths) -> Arc<Self> {
        Arc::new(Self::new(db, paths))
    }

    /// Rebuild the artifact from the catalog tables and replace it on disk.
    pub async fn regenerate(&self) -> Result<(), CatalogExportError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;
        let images = self.repository.list_all_images(&mut tx).await?;
        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        let document = build_document(&products, group_images(images), &categories);
        let payload = serde_json::to_vec_pretty(&document)?;

        self.replace_artifact(&payload)?;

        debug!(
            products = document.products.len(),
            path = %self.paths.primary.display(),
            "catalog export written"
        );

        Ok(())
    }

    // Write-then-rename so readers never observe a half-written file.
    fn replace_artifact(&self, payload: &[u8]) -> Result<(), CatalogExportError> {
        let dir = self.paths.primary.parent().unwrap_or(Path::new("."));

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(payload)?;
        file.persist(&self.paths.primary).map_err(|e| e.error)?;

        Ok(())
    }
}

#[async_trait]
impl CatalogExportHook for CatalogExporter {
    async fn catalog_changed(&self) {
        if let Err(error) = self.regenerate().await {
            warn!(%error, "catalog export regeneration failed");
        }
    }
}

/// Read the current artifact, preferring the primary path.
///
/// A candidate that is missing or not valid JSON is skipped in favor of
/// the next one.
pub fn load_export(paths: &ExportPaths) -> Result<String, CatalogExportError> {
    for path in paths.candidates() {
        let Ok(contents) = std::fs::read_to_string(path) else {
            continue;
        };

        if serde_json::from_str::<serde_json::Value>(&contents).is_ok() {
            return Ok(contents);
        }

        warn!(path = %path.display(), "skipping corrupt export artifact");
    }

    Err(CatalogExportError::Missing)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportDocument {
    pub products: Vec<ExportProduct>,
    pub categories: Vec<ExportCategory>,
    pub variations: Vec<ExportVariation>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportProduct {
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub full_description: String,
    pub price: String,
    pub old_price: String,
    pub quantity: u64,
    pub currency: String,
    pub sku: String,
    pub out_of_stock: bool,
    pub is_featured: bool,
    pub sale_enabled: bool,
    pub sale_start: String,
    pub sale_end: String,
    pub categories: Vec<String>,
    pub variations: Vec<String>,
    pub variation_values: HashMap<String, String>,
    pub images: Vec<ExportImage>,
    pub created: i64,
    pub updated: i64,
    pub is_default: bool,
    pub translations: HashMap<String, ExportProductTranslation>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportProductTranslation {
    pub name: String,
    pub title: String,
    pub description: String,
    pub full_description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportImage {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportCategory {
    pub id: String,
    pub title: String,
    pub category_id: Option<String>,
    pub created: i64,
    pub updated: i64,
    pub translations: HashMap<String, ExportTitleTranslation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportTitleTranslation {
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportVariation {
    pub id: String,
    pub title: String,
    pub items: Vec<ExportVariationItem>,
    pub created: i64,
    pub updated: i64,
    pub translations: HashMap<String, ExportTitleTranslation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportVariationItem {
    pub title: String,
    pub value: String,
}

fn group_images(images: Vec<ProductImage>) -> HashMap<ProductUuid, Vec<ProductImage>> {
    let mut by_product: HashMap<ProductUuid, Vec<ProductImage>> = HashMap::new();

    for image in images {
        by_product.entry(image.product_uuid).or_default().push(image);
    }

    by_product
}

fn build_document(
    products: &[Product],
    images: HashMap<ProductUuid, Vec<ProductImage>>,
    categories: &[Category],
) -> ExportDocument {
    let now = Timestamp::now().as_millisecond();

    ExportDocument {
        products: products
            .iter()
            .map(|product| export_product(product, images.get(&product.uuid), now))
            .collect(),
        categories: categories
            .iter()
            .map(|category| export_category(category, now))
            .collect(),
        variations: static_variations(now),
    }
}

fn export_product(
    product: &Product,
    images: Option<&Vec<ProductImage>>,
    now: i64,
) -> ExportProduct {
    let name = product.title.to_lowercase().replace(' ', "-");
    let description = product
        .description
        .clone()
        .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());
    let full_description = product
        .description
        .clone()
        .unwrap_or_else(|| FALLBACK_FULL_DESCRIPTION.to_string());

    let images = match images {
        Some(images) if !images.is_empty() => images
            .iter()
            .map(|image| ExportImage {
                url: image.url.clone(),
            })
            .collect(),
        _ => vec![ExportImage {
            url: PLACEHOLDER_IMAGE_URL.to_string(),
        }],
    };

    let sell_price = format_price(product.sell_price());
    let old_price = if product.has_discount() {
        format_price(product.price)
    } else {
        sell_price.clone()
    };

    ExportProduct {
        id: product.uuid.to_string(),
        name: name.clone(),
        title: product.title.clone(),
        description: description.clone(),
        full_description: full_description.clone(),
        price: sell_price,
        old_price,
        quantity: product.quantity,
        currency: "USD".to_string(),
        sku: String::new(),
        out_of_stock: product.out_of_stock(),
        is_featured: product.is_bestseller,
        sale_enabled: product.has_discount(),
        sale_start: String::new(),
        sale_end: String::new(),
        categories: vec![product.category_uuid.to_string()],
        variations: Vec::new(),
        variation_values: HashMap::new(),
        images,
        created: now,
        updated: now,
        is_default: true,
        translations: HashMap::from([(
            "ru".to_string(),
            ExportProductTranslation {
                name,
                title: product.title.clone(),
                description,
                full_description,
            },
        )]),
    }
}

fn export_category(category: &Category, now: i64) -> ExportCategory {
    ExportCategory {
        id: category.uuid.to_string(),
        title: category.title.clone(),
        category_id: None,
        created: now,
        updated: now,
        translations: HashMap::from([(
            "en".to_string(),
            ExportTitleTranslation {
                title: category.title.clone(),
            },
        )]),
    }
}

// The frontend expects these two variation axes even though products
// carry no variation values yet.
fn static_variations(now: i64) -> Vec<ExportVariation> {
    let variation = |id: &str, title: &str, items: Vec<(&str, &str)>| ExportVariation {
        id: id.to_string(),
        title: title.to_string(),
        items: items
            .into_iter()
            .map(|(title, value)| ExportVariationItem {
                title: title.to_string(),
                value: value.to_string(),
            })
            .collect(),
        created: now,
        updated: now,
        translations: HashMap::from([(
            "en".to_string(),
            ExportTitleTranslation {
                title: title.to_string(),
            },
        )]),
    };

    vec![
        variation(
            "1",
            "Color",
            vec![
                ("Red", "#ff0000"),
                ("Green", "#00ff00"),
                ("Blue", "#0000ff"),
            ],
        ),
        variation(
            "2",
            "Size",
            vec![("Small", "S"), ("Medium", "M"), ("Large", "L")],
        ),
    ]
}

fn format_price(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
