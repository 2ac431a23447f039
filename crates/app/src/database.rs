//! Database connection management

use sqlx::{PgPool, Postgres, Transaction, postgres::PgPoolOptions};

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// Every service call runs its multi-step work inside one of these, so
    /// a failure anywhere rolls the whole call back.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connect to `PostgreSQL` with a bounded pool.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
