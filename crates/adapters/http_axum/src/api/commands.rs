//! JSON handlers for panel-wide commands.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use smartpanel_domain::command::Command;

use super::devices::ControlResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for the automation switch.
#[derive(Deserialize)]
pub struct AutomationRequest {
    pub enabled: bool,
}

/// `PUT /api/automation`
pub async fn set_automation(
    State(state): State<AppState>,
    Json(req): Json<AutomationRequest>,
) -> Result<ControlResponse, ApiError> {
    state.panel.set_automation_enabled(req.enabled).await?;
    Ok(ControlResponse::NoContent)
}

/// `POST /api/commands`
///
/// Accepts any [`Command`] in its tagged JSON form, e.g.
/// `{"type":"set_brightness","device_id":"Living Room Light","value":40}`.
pub async fn execute(
    State(state): State<AppState>,
    Json(command): Json<Command>,
) -> Result<ControlResponse, ApiError> {
    state.panel.execute(command).await?;
    Ok(ControlResponse::NoContent)
}
