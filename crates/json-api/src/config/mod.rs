//! Server configuration module

use clap::Parser;

use crate::config::{db::DatabaseConfig, export::ExportConfig, server::ServerRuntimeConfig};

pub(crate) mod db;
pub(crate) mod export;
pub(crate) mod server;

/// Globalshop JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "globalshop-json", about = "Globalshop JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Catalog export artifact settings.
    #[command(flatten)]
    pub export: ExportConfig,

    /// Log level filter used when `RUST_LOG` is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
