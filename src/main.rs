use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use activities::config::Config;
use activities::database::registry_db;
use activities::web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let config = Config::from_env();
    info!(database_url = %config.database_url, "opening activity registry");
    let pool = registry_db::open_registry(&config.database_url)
        .await
        .with_context(|| format!("cannot open registry at {}", config.database_url))?;

    let app = web::build_router(pool);
    let listener = bind_with_fallback(&config).await?;
    info!(addr = %listener.local_addr()?, "activities server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

// A taken port gets one retry on the next port up.
async fn bind_with_fallback(config: &Config) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;

    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(e) => {
            let fallback = SocketAddr::new(addr.ip(), config.port.saturating_add(1));
            warn!(%addr, %fallback, error = %e, "bind failed, trying fallback port");
            TcpListener::bind(fallback)
                .await
                .with_context(|| format!("cannot bind {} or {}", addr, fallback))
        }
    }
}
