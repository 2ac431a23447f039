//! Accounts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::accounts::{
        errors::AccountsServiceError,
        models::{NewUser, ProfileUpdate, SessionState, SessionUuid, User, UserUuid},
        password,
        repositories::{PgSessionsRepository, PgUsersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    users: PgUsersRepository,
    sessions: PgSessionsRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            users: PgUsersRepository::new(),
            sessions: PgSessionsRepository::new(),
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn register(&self, user: NewUser) -> Result<User, AccountsServiceError> {
        let phone_number = user.phone_number.trim();

        if phone_number.is_empty() {
            return Err(AccountsServiceError::MissingRequiredData);
        }

        let password_hash = password::hash_password(&user.password)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .users
            .create_user(&mut tx, UserUuid::generate(), phone_number, &password_hash)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn login(
        &self,
        session: SessionUuid,
        phone_number: String,
        password: String,
    ) -> Result<User, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some((user_uuid, hash)) = self
            .users
            .get_credentials(&mut tx, phone_number.trim())
            .await?
        else {
            return Err(AccountsServiceError::InvalidCredentials);
        };

        if !password::verify_password(&password, &hash)? {
            return Err(AccountsServiceError::InvalidCredentials);
        }

        self.sessions.resolve(&mut tx, session).await?;
        self.sessions.attach_user(&mut tx, session, user_uuid).await?;

        let user = self.users.get_user(&mut tx, user_uuid).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn logout(&self, session: SessionUuid) -> Result<(), AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.sessions.delete(&mut tx, session).await?;

        if rows_affected == 0 {
            return Err(AccountsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn lookup_session(
        &self,
        session: SessionUuid,
    ) -> Result<SessionState, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let state = self.sessions.lookup(&mut tx, session).await?;

        tx.commit().await?;

        // Unknown tokens act as anonymous sessions; a row only exists
        // once a user is attached to the session.
        Ok(state.unwrap_or(SessionState {
            uuid: session,
            user_uuid: None,
        }))
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.users.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<User, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .users
            .update_profile(
                &mut tx,
                user,
                update.first_name.as_deref(),
                update.last_name.as_deref(),
                update.email.as_deref(),
            )
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Create an account from a phone number and password.
    async fn register(&self, user: NewUser) -> Result<User, AccountsServiceError>;

    /// Verify credentials and attach the user to the given session.
    async fn login(
        &self,
        session: SessionUuid,
        phone_number: String,
        password: String,
    ) -> Result<User, AccountsServiceError>;

    /// Discard the session state entirely.
    async fn logout(&self, session: SessionUuid) -> Result<(), AccountsServiceError>;

    /// Report who the session belongs to, without persisting anything.
    ///
    /// Unknown tokens come back as anonymous state; session rows are
    /// only written when a user gets attached (login, guest checkout).
    async fn lookup_session(
        &self,
        session: SessionUuid,
    ) -> Result<SessionState, AccountsServiceError>;

    /// Fetch a user by uuid.
    async fn get_user(&self, user: UserUuid) -> Result<User, AccountsServiceError>;

    /// Apply a partial profile update.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<User, AccountsServiceError>;
}
