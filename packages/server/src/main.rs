use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use shelf_server::config::AppConfig;
use shelf_server::state::AppState;
use shelf_server::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database).await?;
    seed::ensure_indexes(&db).await?;
    if let Some(admin) = &config.bootstrap_admin {
        seed::bootstrap_admin(&db, admin).await?;
    }

    let store = common::storage::open_store(&config.storage).await?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = build_router(AppState::new(db, config, store));

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
