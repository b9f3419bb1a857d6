//! Database Config

use clap::Args;

const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Database settings.
#[derive(Debug, Clone, Args)]
pub struct DatabaseConfig {
    /// `SQLite` connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://rentals.db")]
    pub database_url: String,

    /// Maximum pooled connections for file-backed databases
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5_u32)]
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Settings for a private in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            database_url: IN_MEMORY_URL.to_string(),
            max_connections: 1,
        }
    }
}
