//! Account Repositories

mod sessions;
mod users;

pub(crate) use sessions::PgSessionsRepository;
pub(crate) use users::PgUsersRepository;
