use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use service::errors::ServiceError;
use service::timers::{ElapsedView, TimerService};
use tracing::debug;

use crate::errors::ApiError;
use crate::observability::{
    CLICKS_RECORDED_TOTAL, ELAPSED_LOOKUPS_TOTAL, PERSISTENCE_FAILURES_TOTAL, RESETS_TOTAL,
};

#[derive(Clone)]
pub struct AppState {
    pub timers: TimerService,
}

#[derive(Deserialize, Debug, Default)]
pub struct RecordClickBody {
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct ElapsedQuery {
    #[serde(rename = "buttonLabel")]
    pub button_label: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct RecordClickOutput {
    pub success: bool,
}

#[derive(Serialize, Debug)]
pub struct ResetOutput {
    pub ok: bool,
    pub message: &'static str,
}

/// POST `/:label` with `{"timestamp": <ms>}`.
///
/// A missing, non-JSON or mistyped body counts as a missing timestamp.
pub async fn record_click(
    State(state): State<AppState>,
    Path(label): Path<String>,
    body: Result<Json<RecordClickBody>, JsonRejection>,
) -> Result<Json<RecordClickOutput>, ApiError> {
    let timestamp = match body {
        Ok(Json(b)) => b.timestamp,
        Err(rejection) => {
            debug!(label = %label, error = %rejection, "unusable click body");
            None
        }
    };
    state.timers.record_click(Some(&label), timestamp).await.map_err(|e| {
        if matches!(e, ServiceError::Persistence(_)) {
            PERSISTENCE_FAILURES_TOTAL.inc();
        }
        ApiError::from(e)
    })?;
    CLICKS_RECORDED_TOTAL.inc();
    Ok(Json(RecordClickOutput { success: true }))
}

/// POST `/` has no label segment at all.
pub async fn record_click_without_label() -> ApiError {
    ApiError::MissingData
}

/// GET `/getElapsed?buttonLabel=...`. Never fails; unknown labels get the sentinel.
pub async fn get_elapsed(
    State(state): State<AppState>,
    query: Option<Query<ElapsedQuery>>,
) -> Json<ElapsedView> {
    ELAPSED_LOOKUPS_TOTAL.inc();
    let label = query.and_then(|Query(q)| q.button_label);
    Json(state.timers.elapsed(label.as_deref()).await)
}

/// POST `/resetAll` and `/admin/reset-all`.
pub async fn reset_all(State(state): State<AppState>) -> Result<Json<ResetOutput>, ApiError> {
    state.timers.reset_all().await.map_err(|_| {
        PERSISTENCE_FAILURES_TOTAL.inc();
        ApiError::ResetFailed
    })?;
    RESETS_TOTAL.inc();
    Ok(Json(ResetOutput { ok: true, message: "All timers reset to never clicked." }))
}
