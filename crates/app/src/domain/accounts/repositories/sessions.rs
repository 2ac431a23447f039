//! Sessions Repository

use sqlx::{Postgres, Transaction, query, query_as};
use uuid::Uuid;

use crate::domain::accounts::models::{SessionState, SessionUuid, UserUuid};

const LOOKUP_SESSION_SQL: &str = include_str!("../sql/lookup_session.sql");
const RESOLVE_SESSION_SQL: &str = include_str!("../sql/resolve_session.sql");
const ATTACH_SESSION_USER_SQL: &str = include_str!("../sql/attach_session_user.sql");
const DELETE_SESSION_SQL: &str = include_str!("../sql/delete_session.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSessionsRepository;

impl PgSessionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Read-only lookup. Absent rows are not created.
    pub(crate) async fn lookup(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<Option<SessionState>, sqlx::Error> {
        let row: Option<(Uuid, Option<Uuid>)> = query_as(LOOKUP_SESSION_SQL)
            .bind(session.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(|(uuid, user_uuid)| SessionState {
            uuid: SessionUuid::from_uuid(uuid),
            user_uuid: user_uuid.map(UserUuid::from_uuid),
        }))
    }

    /// Atomic get-or-create of the session row.
    pub(crate) async fn resolve(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<SessionState, sqlx::Error> {
        let (uuid, user_uuid): (Uuid, Option<Uuid>) = query_as(RESOLVE_SESSION_SQL)
            .bind(session.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(SessionState {
            uuid: SessionUuid::from_uuid(uuid),
            user_uuid: user_uuid.map(UserUuid::from_uuid),
        })
    }

    pub(crate) async fn attach_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ATTACH_SESSION_USER_SQL)
            .bind(session.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SESSION_SQL)
            .bind(session.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
