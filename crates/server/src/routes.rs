use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::{metrics::encode_metrics, types::Health};

pub mod timers;

pub use timers::AppState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (axum::http::StatusCode, String) {
    encode_metrics()
}

/// Build the full application router.
///
/// Static segments (`/resetAll`, `/getElapsed`, `/health`, `/metrics`) always
/// win over the `/:label` capture, whatever the registration order, so those
/// names can never be recorded as labels. Reset is also reachable under the
/// `/admin` prefix, which no single-segment label can reach.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let system = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    let admin = Router::new().route("/admin/reset-all", post(timers::reset_all));

    let api = Router::new()
        .route("/resetAll", post(timers::reset_all))
        .route("/getElapsed", get(timers::get_elapsed))
        .route("/", post(timers::record_click_without_label))
        .route("/:label", post(timers::record_click));

    system
        .merge(admin)
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
