use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use service::records::repo::seaorm::SeaOrmRecordStore;
use service::records::ReferencePolicy;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let addr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad listen address: {e}")))?;
    Ok(addr)
}

/// Connect the pool, apply migrations when configured, and wire the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(format!("migrations failed: {e}")))?;
        info!("migrations applied");
    }

    let policy = ReferencePolicy::from_strict(cfg.records.strict_references);
    info!(?policy, "reference policy");
    let store = Arc::new(SeaOrmRecordStore::new(db));
    let state = ServerState::new(store, policy);
    Ok(routes::build_router(state, build_cors()))
}

/// Resolves on Ctrl+C, or SIGTERM on unix. A handler that cannot be
/// installed never resolves, so the other one still stops the server.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "ctrl_c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(signal = "ctrl_c", "shutting down"),
        _ = terminate => info!(signal = "sigterm", "shutting down"),
    }
}

/// Serve `app` until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}

/// Public entry: build the app and serve until Ctrl+C or SIGTERM.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting academic records server");
    let listener = TcpListener::bind(addr).await?;
    serve(listener, app, shutdown_signal()).await
}
