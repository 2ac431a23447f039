//! Catalog service.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::accounts::models::UserUuid,
    domain::catalog::{
        errors::CatalogServiceError,
        export::CatalogExportHook,
        models::{
            Category, NewCategory, NewProduct, NewProductImage, NewSubcategory, Product,
            ProductImage, ProductImageUuid, ProductUpdate, ProductUuid, Subcategory,
        },
        repository::PgCatalogRepository,
    },
};

#[derive(Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
    export_hook: Arc<dyn CatalogExportHook>,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db, export_hook: Arc<dyn CatalogExportHook>) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
            export_hook,
        }
    }

    fn attach_images(products: &mut [Product], images: Vec<ProductImage>) {
        let mut by_product: HashMap<ProductUuid, Vec<ProductImage>> = HashMap::new();

        for image in images {
            by_product.entry(image.product_uuid).or_default().push(image);
        }

        for product in products {
            if let Some(images) = by_product.remove(&product.uuid) {
                product.images = images;
            }
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let mut products = self.repository.list_products(&mut tx).await?;
        let images = self.repository.list_all_images(&mut tx).await?;

        tx.commit().await?;

        Self::attach_images(&mut products, images);

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let mut found = self.repository.get_product(&mut tx, product).await?;
        found.images = self.repository.list_product_images(&mut tx, product).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError> {
        if product.title.trim().is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        self.export_hook.catalog_changed().await;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, CatalogServiceError> {
        if update.title.trim().is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_product(&mut tx, product, &update).await?;

        tx.commit().await?;

        self.export_hook.catalog_changed().await;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        self.export_hook.catalog_changed().await;

        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CatalogServiceError> {
        if category.title.trim().is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, &category).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_subcategories(&self) -> Result<Vec<Subcategory>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let subcategories = self.repository.list_subcategories(&mut tx).await?;

        tx.commit().await?;

        Ok(subcategories)
    }

    async fn create_subcategory(
        &self,
        subcategory: NewSubcategory,
    ) -> Result<Subcategory, CatalogServiceError> {
        if subcategory.title.trim().is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_subcategory(&mut tx, &subcategory).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn add_product_image(
        &self,
        image: NewProductImage,
    ) -> Result<ProductImage, CatalogServiceError> {
        if image.url.trim().is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product_image(&mut tx, &image).await?;

        tx.commit().await?;

        self.export_hook.catalog_changed().await;

        Ok(created)
    }

    async fn delete_product_image(
        &self,
        image: ProductImageUuid,
    ) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product_image(&mut tx, image).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        self.export_hook.catalog_changed().await;

        Ok(())
    }

    async fn toggle_favorite(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<bool, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        // Existence check keeps the toggle from favoriting a deleted product.
        self.repository.get_product(&mut tx, product).await?;

        let favorited = if self.repository.is_favorited(&mut tx, user, product).await? {
            self.repository.remove_favorite(&mut tx, user, product).await?;
            false
        } else {
            self.repository.add_favorite(&mut tx, user, product).await?;
            true
        };

        tx.commit().await?;

        Ok(favorited)
    }

    async fn favorites_count(&self, user: UserUuid) -> Result<u64, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self.repository.favorites_count(&mut tx, user).await?;

        tx.commit().await?;

        Ok(count)
    }

    async fn list_favorites(&self, user: UserUuid) -> Result<Vec<Product>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let mut products = self.repository.list_favorites(&mut tx, user).await?;
        let images = self.repository.list_all_images(&mut tx).await?;

        tx.commit().await?;

        Self::attach_images(&mut products, images);

        Ok(products)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// All products, newest first, with their images attached.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError>;

    /// A single product with its images.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError>;

    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError>;

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, CatalogServiceError>;

    async fn delete_product(&self, product: ProductUuid) -> Result<(), CatalogServiceError>;

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError>;

    async fn create_category(&self, category: NewCategory)
    -> Result<Category, CatalogServiceError>;

    async fn list_subcategories(&self) -> Result<Vec<Subcategory>, CatalogServiceError>;

    async fn create_subcategory(
        &self,
        subcategory: NewSubcategory,
    ) -> Result<Subcategory, CatalogServiceError>;

    async fn add_product_image(
        &self,
        image: NewProductImage,
    ) -> Result<ProductImage, CatalogServiceError>;

    async fn delete_product_image(
        &self,
        image: ProductImageUuid,
    ) -> Result<(), CatalogServiceError>;

    /// Flip the favorite mark for a user and product. Returns the new state.
    async fn toggle_favorite(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<bool, CatalogServiceError>;

    async fn favorites_count(&self, user: UserUuid) -> Result<u64, CatalogServiceError>;

    async fn list_favorites(&self, user: UserUuid) -> Result<Vec<Product>, CatalogServiceError>;
}
