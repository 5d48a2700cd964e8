use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::observability::init_metrics;
use crate::routes::{self, AppState};
use service::{
    clock::SystemClock,
    file::FileTimerStore,
    timers::{TimerService, TimerStore},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the configured store and wire it into the handler state.
pub async fn build_state(cfg: &AppConfig) -> AppState {
    let store = FileTimerStore::open(&cfg.storage.path, cfg.storage.reset_strategy).await;
    info!(
        service = "server",
        event = "store_loaded",
        path = %store.path().display(),
        timers = store.len().await,
        reset_strategy = ?store.reset_strategy(),
        "timer store ready"
    );
    let timers = TimerService::new(store, Arc::new(SystemClock));
    AppState { timers }
}

/// Public entry: build the app and run the HTTP server until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    init_metrics();

    let state = build_state(&cfg).await;
    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(service = "server", event = "listening", %addr, "server running on http://{}", addr);
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}
