//! Server configuration.
//!
//! Configuration is read from environment variables with local-development
//! defaults. Missing values never abort startup; the defaults are logged so
//! a misconfigured deployment is visible.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Runtime configuration for the server and batch binaries.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port for the HTTP server.
    pub port: u16,
    /// sqlx connection string, e.g. `sqlite:syncchat.db?mode=rwc`.
    pub database_url: String,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// - `SERVER_PORT` (default `3000`)
    /// - `DATABASE_URL` (default `sqlite:syncchat.db?mode=rwc`)
    pub fn from_env() -> Self {
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            tracing::warn!("DATABASE_URL not set, using local sqlite file");
            "sqlite:syncchat.db?mode=rwc".to_string()
        });

        Self { port, database_url }
    }
}

/// Create the connection pool and bring the schema up to date.
///
/// Migrations are embedded from `./migrations` at compile time and are
/// idempotent, so this is safe to run on every startup.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new().connect(database_url).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations up to date");

    Ok(pool)
}
