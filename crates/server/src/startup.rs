use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::{
    records::{RecordRepository, RecordStore},
    runtime,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;

/// Shared handler state; the store is owned here for the server's lifetime.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordRepository>,
}

impl AppState {
    pub fn new(records: Arc<dyn RecordRepository>) -> Self {
        Self { records }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Open the record store and build the full router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let storage = &cfg.storage;
    runtime::ensure_env(&storage.frontend_dir, &storage.data_file, &storage.export_file).await?;

    // A malformed data file aborts startup here.
    let store = RecordStore::open(&storage.data_file, &storage.export_file).await?;
    let state = AppState::new(store);

    Ok(routes::build_router(state, &storage.frontend_dir, build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, data_file = %cfg.storage.data_file, "starting record server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
