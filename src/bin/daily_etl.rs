//! Daily analytics job entry point.
//!
//! Computes the current date's user-registration and message counts and
//! upserts the summary row. Intended to be invoked by an external scheduler
//! (e.g. a daily cron trigger); any failure aborts the whole unit of work
//! and the process exits nonzero.

use syncchat::analytics::job::run_daily_aggregation;
use syncchat::server::config::ServerConfig;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "syncchat=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = ServerConfig::from_env();
    let pool = match syncchat::server::config::connect_database(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    match run_daily_aggregation(&pool).await {
        Ok(summary) => {
            tracing::info!(
                "Aggregation complete for {}: {} new users, {} messages sent",
                summary.date,
                summary.new_users_count,
                summary.messages_sent_count
            );
        }
        Err(e) => {
            tracing::error!("Aggregation failed, no partial data written: {e}");
            std::process::exit(1);
        }
    }
}
