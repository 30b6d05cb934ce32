//! Syncchat server entry point.
//!
//! Initializes tracing, connects to the database, and serves the HTTP +
//! WebSocket application.

use syncchat::server::config::ServerConfig;
use syncchat::server::init::create_app;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "syncchat=debug,tower_http=info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = ServerConfig::from_env();
    tracing::info!("Connecting to database at {}", config.database_url);
    let pool = syncchat::server::config::connect_database(&config.database_url).await?;

    let app = create_app(pool);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
