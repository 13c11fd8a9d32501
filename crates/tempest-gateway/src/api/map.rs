use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::ApiError;
use crate::app_state::AppState;
use crate::sessions::Coordinates;

pub async fn map_lookup(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Coordinates>, ApiError> {
    let coords = state.sessions().lookup(&token)?;
    Ok(Json(coords))
}
