use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use service::user::validator::ValidationPolicy;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only by termination");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Connect, migrate and assemble the router. This is the composition point of
/// the HTTP front end: repository, service and state are created here.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        models::db::migrate(&db).await?;
        info!("migrations applied");
    }
    let state = AppState::new(db, ValidationPolicy::from(&cfg.validation));
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = cfg
        .server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}: {e}", cfg.server.bind_addr())))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "user registry listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
