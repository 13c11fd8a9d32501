use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use tempest_core::ObservationRecord;

use crate::app_state::AppState;

/// Latest record, or an empty object before the first successful cycle.
pub async fn current(State(state): State<AppState>) -> Response {
    match state.store().latest() {
        Some(record) => Json(record.as_ref()).into_response(),
        None => Json(json!({})).into_response(),
    }
}

/// Every retained record, oldest first.
pub async fn history(State(state): State<AppState>) -> Response {
    let snapshot = state.store().history();
    let records: Vec<&ObservationRecord> = snapshot.iter().map(Arc::as_ref).collect();
    Json(records).into_response()
}
