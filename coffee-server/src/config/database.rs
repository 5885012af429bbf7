use confique::Config;

/// Configuration for the drink store
#[derive(Debug, Config, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection string (default: sqlite://database.db?mode=rwc)
    #[config(env = "COFFEE_DATABASE_URL", default = "sqlite://database.db?mode=rwc")]
    pub url: String,

    /// Maximum number of pooled connections (default: 5)
    #[config(env = "COFFEE_DATABASE_MAX_CONNECTIONS", default = 5)]
    pub max_connections: u32,

    /// Drop and recreate the drinks table on startup, seeding one drink.
    /// Destroys all existing records (default: false)
    #[config(env = "COFFEE_DATABASE_RESET_ON_START", default = false)]
    pub reset_on_start: bool,
}

impl DatabaseConfig {
    /// In-memory database with a single connection, so every query sees the
    /// same database
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            reset_on_start: false,
        }
    }
}
