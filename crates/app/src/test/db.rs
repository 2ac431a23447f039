//! Database test utilities and shared infrastructure

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};

const PG_USER: &str = "globalshop_test";
const PG_PASSWORD: &str = "globalshop_test_password";

/// Validates a database name to prevent SQL injection
///
/// Database names must:
/// - Be 1-63 characters long
/// - Start with a letter or underscore
/// - Contain only letters, digits, underscores, and dollar signs
/// - Not be a PostgreSQL reserved word
fn validate_database_name(name: &str) -> Result<(), String> {
    if name.is_empty() || name.len() > 63 {
        return Err("Database name must be 1-63 characters long".to_string());
    }

    if !name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        return Err("Database name must start with a letter or underscore".to_string());
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    {
        return Err(
            "Database name can only contain letters, digits, underscores, and dollar signs"
                .to_string(),
        );
    }

    // Check against some common PostgreSQL reserved words that could be problematic
    let reserved_words = [
        "user", "table", "select", "insert", "update", "delete", "drop", "create", "alter",
        "index", "database", "schema", "role", "grant", "revoke",
    ];

    if reserved_words
        .iter()
        .any(|&word| name.eq_ignore_ascii_case(word))
    {
        return Err(format!("Database name '{name}' is a reserved word"));
    }

    Ok(())
}

/// Shared PostgreSQL container initialization
async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(PG_USER)
        .with_password(PG_PASSWORD)
        .with_db_name(PG_USER)
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

/// Shared PostgreSQL container that starts once and is reused across all tests
static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

/// Cleanup channel for database cleanup requests
static CLEANUP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

async fn init_cleanup_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(db_name) = receiver.recv().await {
            if let Err(err) = cleanup_database(&db_name).await {
                eprintln!("Failed to cleanup database '{db_name}': {err}");
            }
        }
    });

    sender
}

/// Drop a test database by name.
async fn cleanup_database(db_name: &str) -> Result<(), sqlx::Error> {
    if let Some(container) = POSTGRES_CONTAINER.get()
        && let Ok(port) = container.get_host_port_ipv4(5432).await
    {
        let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE")
            .unwrap_or_else(|_| "localhost".to_string());
        let base_url = format!("postgresql://{PG_USER}:{PG_PASSWORD}@{host}:{port}/postgres");

        if let Ok(mut conn) = PgConnection::connect(&base_url).await {
            if validate_database_name(db_name).is_ok() {
                let drop_query = format!("DROP DATABASE IF EXISTS \"{db_name}\"");
                let _ = sqlx::query(&drop_query).execute(&mut conn).await;
            }
            let _ = conn.close().await;
        }
    }

    Ok(())
}

/// Test database configuration
///
/// Each `TestDb` instance creates a uniquely named database within a shared
/// PostgreSQL container, with migrations applied. The database is dropped
/// again when the instance goes out of scope.
///
/// Isolation is database-level: services commit their own transactions
/// normally, and clean state comes from the per-test database rather than
/// from any rollback mechanism.
#[derive(Debug, Clone)]
pub struct TestDb {
    /// PostgreSQL connection pool
    pub pool: PgPool,

    /// PostgreSQL database name
    pub name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = CLEANUP_SENDER.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    /// Create an isolated test database with a unique generated name.
    pub async fn new() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        let thread_id = std::thread::current().id();

        let name =
            format!("globalshop_test_{nanos}_{thread_id:?}").replace([':', ' ', '(', ')'], "");

        Self::new_with_db_name(&name).await
    }

    /// Create an isolated test database with the given name.
    pub async fn new_with_db_name(db_name: &str) -> Self {
        let _cleanup_sender = CLEANUP_SENDER.get_or_init(init_cleanup_task).await;

        if let Err(error) = validate_database_name(db_name) {
            panic!("Invalid database name '{db_name}': {error}");
        }

        let container = POSTGRES_CONTAINER
            .get_or_init(init_postgres_container)
            .await;

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get container port");

        let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE")
            .unwrap_or_else(|_| "localhost".to_string());

        let base_url = format!("postgresql://{PG_USER}:{PG_PASSWORD}@{host}:{port}/postgres");

        let mut conn = PgConnection::connect(&base_url)
            .await
            .expect("Failed to connect to postgres database");

        let create_db_query = format!("CREATE DATABASE \"{db_name}\"");

        sqlx::query(&create_db_query)
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let database_url = format!("postgresql://{PG_USER}:{PG_PASSWORD}@{host}:{port}/{db_name}");

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to create pool for database");

        let instance = Self {
            pool,
            name: db_name.to_string(),
        };

        sqlx::migrate!("../../migrations")
            .run(&instance.pool)
            .await
            .expect("Failed to run migrations on database");

        instance
    }

    /// Returns the connection pool for this test database.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        assert!(validate_database_name("valid_name").is_ok());
        assert!(validate_database_name("_underscore_start").is_ok());
        assert!(validate_database_name("test123").is_ok());
    }

    #[test]
    fn rejects_malformed_names() {
        assert!(validate_database_name("").is_err());
        assert!(validate_database_name(&"a".repeat(64)).is_err());
        assert!(validate_database_name("123invalid").is_err());
        assert!(validate_database_name("invalid-hyphen").is_err());
        assert!(validate_database_name("invalid space").is_err());
    }

    #[test]
    fn rejects_reserved_words() {
        assert!(validate_database_name("user").is_err());
        assert!(validate_database_name("SELECT").is_err());
    }

    #[tokio::test]
    async fn container_starts_and_migrates() {
        let test_db = TestDb::new().await;

        let result: i64 = sqlx::query_scalar("SELECT count(*) FROM products")
            .fetch_one(test_db.pool())
            .await
            .expect("Failed to query migrated schema");

        assert_eq!(result, 0);
    }
}
