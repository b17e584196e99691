//! `guarantee-api`: serves the guarantee ledger over HTTP
//!
//! Reads `API_*` variables (see [`ApiConfig`]) plus an optional `.env`,
//! applies pending migrations, then serves until Ctrl+C or SIGTERM.
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/guarantees API_PORT=8080 guarantee-api
//! API_LOG_JSON=true guarantee-api   # structured logs for collectors
//! ```

use std::net::SocketAddr;

use anyhow::Context;
use infra_db::{create_pool, run_migrations, Repositories};
use interface_api::{config::ApiConfig, create_router};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let (config, config_error) = ApiConfig::load();
    init_tracing(&config);
    if let Some(err) = config_error {
        warn!(error = %err, "Invalid API_ configuration, using defaults");
    }

    info!(
        host = %config.host,
        port = config.port,
        version = env!("CARGO_PKG_VERSION"),
        "Starting guarantee ledger API"
    );
    run(config).await
}

async fn run(config: ApiConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    let pool = create_pool(config.database())
        .await
        .context("connecting to the database")?;
    run_migrations(&pool)
        .await
        .context("applying migrations")?;

    let app = create_router(Repositories::new(pool.clone()), config);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving requests")?;

    pool.close().await;
    info!("Shutdown complete");
    Ok(())
}

/// `RUST_LOG` takes precedence over the configured level
fn init_tracing(config: &ApiConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_target(true)).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, draining connections"),
        _ = terminate => info!("SIGTERM received, draining connections"),
    }
}
