//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    accounts::models::UserUuid,
    catalog::models::{ProductUuid, sell_price},
    catalog::repository::{to_amount, try_get_amount},
    orders::models::{AddressUuid, Order, OrderItemUuid, OrderLine, OrderUuid, PaymentMethod},
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LIST_ORDER_LINES_SQL: &str = include_str!("../sql/list_order_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        address: AddressUuid,
        payment_method: PaymentMethod,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(OrderUuid::generate().into_uuid())
            .bind(user.into_uuid())
            .bind(address.into_uuid())
            .bind(payment_method)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::generate().into_uuid())
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .bind(to_amount(quantity)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        query_as::<Postgres, OrderLine>(LIST_ORDER_LINES_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            address_uuid: row
                .try_get::<Option<Uuid>, _>("address_uuid")?
                .map(AddressUuid::from_uuid),
            status: row.try_get("status")?,
            payment_method: row.try_get("payment_method")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price = try_get_amount(row, "price")?;
        let discount: Decimal = row.try_get("discount")?;

        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            title: row.try_get("title")?,
            quantity: try_get_amount(row, "quantity")?,
            unit_price: sell_price(price, discount),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
