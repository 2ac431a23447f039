//! Database Config

use clap::Args;

/// Application database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum number of pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value = "10")]
    pub max_connections: u32,
}
