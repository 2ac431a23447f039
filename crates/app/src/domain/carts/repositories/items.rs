//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    carts::models::{CartItem, CartItemUuid, CartSummary, CartUuid},
    catalog::models::ProductUuid,
    catalog::repository::{to_amount, try_get_amount},
};

const LIST_ITEMS_SQL: &str = include_str!("../sql/list_items.sql");
const FIND_ITEM_SQL: &str = include_str!("../sql/find_item.sql");
const FIND_ITEM_BY_PRODUCT_SQL: &str = include_str!("../sql/find_item_by_product.sql");
const INSERT_ITEM_SQL: &str = include_str!("../sql/insert_item.sql");
const UPDATE_ITEM_SQL: &str = include_str!("../sql/update_item.sql");
const DELETE_ITEM_SQL: &str = include_str!("../sql/delete_item.sql");
const CLEAR_ITEMS_SQL: &str = include_str!("../sql/clear_items.sql");
const TOTALS_SQL: &str = include_str!("../sql/totals.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(LIST_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(FIND_ITEM_SQL)
            .bind(cart.into_uuid())
            .bind(item.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_item_by_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(FIND_ITEM_BY_PRODUCT_SQL)
            .bind(cart.into_uuid())
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn insert_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        product: ProductUuid,
        quantity: u64,
        price: u64,
    ) -> Result<CartItem, sqlx::Error> {
        query_as::<Postgres, CartItem>(INSERT_ITEM_SQL)
            .bind(CartItemUuid::generate().into_uuid())
            .bind(cart.into_uuid())
            .bind(product.into_uuid())
            .bind(to_amount(quantity)?)
            .bind(to_amount(price)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
        quantity: u64,
        price: u64,
    ) -> Result<CartItem, sqlx::Error> {
        query_as::<Postgres, CartItem>(UPDATE_ITEM_SQL)
            .bind(cart.into_uuid())
            .bind(item.into_uuid())
            .bind(to_amount(quantity)?)
            .bind(to_amount(price)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ITEM_SQL)
            .bind(cart.into_uuid())
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_ITEMS_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Summed totals, computed in the store so they match what it holds.
    pub(crate) async fn totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<CartSummary, sqlx::Error> {
        let row = query_as::<Postgres, CartSummary>(TOTALS_SQL)
            .bind(cart.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(row)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_amount(row, "quantity")?,
            price: try_get_amount(row, "price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            total_price: try_get_amount(row, "total_price")?,
            total_quantity: try_get_amount(row, "total_quantity")?,
        })
    }
}
