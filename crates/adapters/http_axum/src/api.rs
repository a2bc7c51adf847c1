//! JSON REST API handlers.
//!
//! - `GET  /api/panel`                    : current snapshot
//! - `GET  /api/panel/stream`             : SSE, one snapshot per tick
//! - `GET  /api/devices`                  : registry listing
//! - `POST /api/devices/{id}/toggle`      : toggle power
//! - `POST /api/devices/{id}/motion`      : press "Detect Motion"
//! - `PUT  /api/devices/{id}/brightness`  : move the brightness slider
//! - `PUT  /api/devices/{id}/temperature` : move the temperature slider
//! - `PUT  /api/automation`               : switch automation
//! - `POST /api/commands`                 : any command as tagged JSON

pub mod commands;
pub mod devices;
pub mod panel;
pub mod sse;

use axum::Router;
use axum::routing::{get, post, put};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/panel", get(panel::get))
        .route("/panel/stream", get(sse::stream))
        .route("/devices", get(devices::list))
        .route("/devices/{id}/toggle", post(devices::toggle))
        .route("/devices/{id}/motion", post(devices::trigger_motion))
        .route("/devices/{id}/brightness", put(devices::set_brightness))
        .route("/devices/{id}/temperature", put(devices::set_temperature))
        .route("/automation", put(commands::set_automation))
        .route("/commands", post(commands::execute))
}
