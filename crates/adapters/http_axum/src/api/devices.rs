//! JSON REST handlers for per-device controls.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use smartpanel_domain::id::DeviceId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for the slider endpoints.
#[derive(Deserialize)]
pub struct SliderRequest {
    pub value: i64,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<String>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the control endpoints.
pub enum ControlResponse {
    NoContent,
}

impl IntoResponse for ControlResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list(State(state): State<AppState>) -> Result<ListResponse, ApiError> {
    let snapshot = state.panel.snapshot().await?;
    Ok(ListResponse::Ok(Json(snapshot.listing)))
}

/// `POST /api/devices/{id}/toggle`
pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ControlResponse, ApiError> {
    state.panel.toggle_power(DeviceId::new(id)).await?;
    Ok(ControlResponse::NoContent)
}

/// `POST /api/devices/{id}/motion`
pub async fn trigger_motion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ControlResponse, ApiError> {
    state.panel.trigger_motion(DeviceId::new(id)).await?;
    Ok(ControlResponse::NoContent)
}

/// `PUT /api/devices/{id}/brightness`
pub async fn set_brightness(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SliderRequest>,
) -> Result<ControlResponse, ApiError> {
    state
        .panel
        .set_brightness(DeviceId::new(id), req.value)
        .await?;
    Ok(ControlResponse::NoContent)
}

/// `PUT /api/devices/{id}/temperature`
pub async fn set_temperature(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SliderRequest>,
) -> Result<ControlResponse, ApiError> {
    state
        .panel
        .set_temperature(DeviceId::new(id), req.value)
        .await?;
    Ok(ControlResponse::NoContent)
}
