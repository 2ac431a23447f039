//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::accounts::models::{User, UserUuid};

const CREATE_USER_SQL: &str = include_str!("../sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("../sql/get_user.sql");
const GET_CREDENTIALS_SQL: &str = include_str!("../sql/get_credentials.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("../sql/update_profile.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        phone_number: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(user.into_uuid())
            .bind(phone_number)
            .bind(password_hash)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Look up the uuid and password hash for a phone number.
    pub(crate) async fn get_credentials(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        phone_number: &str,
    ) -> Result<Option<(UserUuid, String)>, sqlx::Error> {
        let row: Option<(Uuid, String)> = query_as(GET_CREDENTIALS_SQL)
            .bind(phone_number)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(|(uuid, hash)| (UserUuid::from_uuid(uuid), hash)))
    }

    /// Apply a profile update; `None` fields keep their current value.
    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(UPDATE_PROFILE_SQL)
            .bind(user.into_uuid())
            .bind(first_name)
            .bind(last_name)
            .bind(email)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            phone_number: row.try_get("phone_number")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
