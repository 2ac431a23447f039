//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    accounts::models::{SessionUuid, UserUuid},
    carts::models::{Cart, CartUuid},
};

const RESOLVE_CART_FOR_USER_SQL: &str = include_str!("../sql/resolve_cart_for_user.sql");
const RESOLVE_CART_FOR_SESSION_SQL: &str = include_str!("../sql/resolve_cart_for_session.sql");
const ASSIGN_USER_SQL: &str = include_str!("../sql/assign_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Get-or-create the cart owned by a user.
    pub(crate) async fn resolve_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(RESOLVE_CART_FOR_USER_SQL)
            .bind(CartUuid::generate().into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Get-or-create the cart owned by an anonymous session.
    pub(crate) async fn resolve_for_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(RESOLVE_CART_FOR_SESSION_SQL)
            .bind(CartUuid::generate().into_uuid())
            .bind(session.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Reassign a session cart to a user, detaching it from the session.
    pub(crate) async fn assign_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ASSIGN_USER_SQL)
            .bind(cart.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: row
                .try_get::<Option<Uuid>, _>("user_uuid")?
                .map(UserUuid::from_uuid),
            session_uuid: row
                .try_get::<Option<Uuid>, _>("session_uuid")?
                .map(SessionUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
