//! Catalog Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::catalog::models::{
    Category, CategoryUuid, NewCategory, NewProduct, NewProductImage, NewSubcategory, Product,
    ProductImage, ProductImageUuid, ProductUpdate, ProductUuid, Subcategory, SubcategoryUuid,
};
use crate::domain::accounts::models::UserUuid;

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");
const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const LIST_SUBCATEGORIES_SQL: &str = include_str!("sql/list_subcategories.sql");
const CREATE_SUBCATEGORY_SQL: &str = include_str!("sql/create_subcategory.sql");
const LIST_PRODUCT_IMAGES_SQL: &str = include_str!("sql/list_product_images.sql");
const LIST_ALL_IMAGES_SQL: &str = include_str!("sql/list_all_images.sql");
const CREATE_PRODUCT_IMAGE_SQL: &str = include_str!("sql/create_product_image.sql");
const DELETE_PRODUCT_IMAGE_SQL: &str = include_str!("sql/delete_product_image.sql");
const IS_FAVORITED_SQL: &str = include_str!("sql/is_favorited.sql");
const ADD_FAVORITE_SQL: &str = include_str!("sql/add_favorite.sql");
const REMOVE_FAVORITE_SQL: &str = include_str!("sql/remove_favorite.sql");
const FAVORITES_COUNT_SQL: &str = include_str!("sql/favorites_count.sql");
const LIST_FAVORITES_SQL: &str = include_str!("sql/list_favorites.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.title)
            .bind(product.description.as_deref())
            .bind(product.slug.as_deref())
            .bind(to_amount(product.price)?)
            .bind(product.discount)
            .bind(to_amount(product.quantity)?)
            .bind(product.category_uuid.into_uuid())
            .bind(product.subcategory_uuid.map(SubcategoryUuid::into_uuid))
            .bind(product.is_bestseller)
            .bind(product.is_promo)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: &ProductUpdate,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(&update.title)
            .bind(update.description.as_deref())
            .bind(update.slug.as_deref())
            .bind(to_amount(update.price)?)
            .bind(update.discount)
            .bind(to_amount(update.quantity)?)
            .bind(update.category_uuid.into_uuid())
            .bind(update.subcategory_uuid.map(SubcategoryUuid::into_uuid))
            .bind(update.is_bestseller)
            .bind(update.is_promo)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Guarded stock decrement: affects zero rows when the remaining
    /// stock is insufficient.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(to_amount(quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Category>, sqlx::Error> {
        query_as::<Postgres, Category>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &NewCategory,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Postgres, Category>(CREATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(&category.title)
            .bind(category.slug.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_subcategories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Subcategory>, sqlx::Error> {
        query_as::<Postgres, Subcategory>(LIST_SUBCATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_subcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subcategory: &NewSubcategory,
    ) -> Result<Subcategory, sqlx::Error> {
        query_as::<Postgres, Subcategory>(CREATE_SUBCATEGORY_SQL)
            .bind(subcategory.uuid.into_uuid())
            .bind(&subcategory.title)
            .bind(subcategory.slug.as_deref())
            .bind(subcategory.category_uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_product_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ProductImage>, sqlx::Error> {
        query_as::<Postgres, ProductImage>(LIST_PRODUCT_IMAGES_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_all_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductImage>, sqlx::Error> {
        query_as::<Postgres, ProductImage>(LIST_ALL_IMAGES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product_image(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        image: &NewProductImage,
    ) -> Result<ProductImage, sqlx::Error> {
        query_as::<Postgres, ProductImage>(CREATE_PRODUCT_IMAGE_SQL)
            .bind(image.uuid.into_uuid())
            .bind(image.product_uuid.into_uuid())
            .bind(&image.url)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product_image(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        image: ProductImageUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_IMAGE_SQL)
            .bind(image.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn is_favorited(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(IS_FAVORITED_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn add_favorite(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), sqlx::Error> {
        query(ADD_FAVORITE_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn remove_favorite(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), sqlx::Error> {
        query(REMOVE_FAVORITE_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn favorites_count(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(FAVORITES_COUNT_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn list_favorites(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_FAVORITES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            slug: row.try_get("slug")?,
            price: try_get_amount(row, "price")?,
            discount: row.try_get::<Decimal, _>("discount")?,
            quantity: try_get_amount(row, "quantity")?,
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            subcategory_uuid: row
                .try_get::<Option<uuid::Uuid>, _>("subcategory_uuid")?
                .map(SubcategoryUuid::from_uuid),
            is_bestseller: row.try_get("is_bestseller")?,
            is_promo: row.try_get("is_promo")?,
            images: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Category {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Subcategory {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SubcategoryUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductImage {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductImageUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            url: row.try_get("url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn to_amount(value: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
