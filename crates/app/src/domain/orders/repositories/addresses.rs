//! Addresses Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    accounts::models::UserUuid,
    orders::models::{Address, AddressUuid, NewAddress},
};

const CREATE_ADDRESS_SQL: &str = include_str!("../sql/create_address.sql");
const FIND_ADDRESS_SQL: &str = include_str!("../sql/find_address.sql");
const LATEST_ADDRESS_SQL: &str = include_str!("../sql/latest_address.sql");
const GET_ADDRESS_SQL: &str = include_str!("../sql/get_address.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAddressesRepository;

impl PgAddressesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        address: &NewAddress,
    ) -> Result<Address, sqlx::Error> {
        query_as::<Postgres, Address>(CREATE_ADDRESS_SQL)
            .bind(AddressUuid::generate().into_uuid())
            .bind(user.into_uuid())
            .bind(&address.city)
            .bind(&address.street)
            .bind(&address.house)
            .bind(&address.building)
            .bind(&address.apartment)
            .bind(&address.postal_code)
            .fetch_one(&mut **tx)
            .await
    }

    /// An existing address with identical fields, if the user has one.
    pub(crate) async fn find_matching(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        address: &NewAddress,
    ) -> Result<Option<Address>, sqlx::Error> {
        query_as::<Postgres, Address>(FIND_ADDRESS_SQL)
            .bind(user.into_uuid())
            .bind(&address.city)
            .bind(&address.street)
            .bind(&address.house)
            .bind(&address.building)
            .bind(&address.apartment)
            .bind(&address.postal_code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn latest(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<Address>, sqlx::Error> {
        query_as::<Postgres, Address>(LATEST_ADDRESS_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: AddressUuid,
    ) -> Result<Address, sqlx::Error> {
        query_as::<Postgres, Address>(GET_ADDRESS_SQL)
            .bind(address.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Address {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AddressUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            city: row.try_get("city")?,
            street: row.try_get("street")?,
            house: row.try_get("house")?,
            building: row.try_get("building")?,
            apartment: row.try_get("apartment")?,
            postal_code: row.try_get("postal_code")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
