//! JSON handler for the panel snapshot.

use axum::Json;
use axum::extract::State;

use smartpanel_domain::snapshot::PanelSnapshot;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/panel`
pub async fn get(State(state): State<AppState>) -> Result<Json<PanelSnapshot>, ApiError> {
    let snapshot = state.panel.snapshot().await?;
    Ok(Json(snapshot))
}
