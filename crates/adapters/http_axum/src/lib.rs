//! # smartpanel-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum): the panel's
//! presentation and command interface.
//!
//! ## Responsibilities
//! - Accept **user commands** (toggle, sliders, motion button, automation
//!   switch) and forward them to the panel actor
//! - Serve the **current snapshot** and registry listing as JSON
//! - Stream a **snapshot per tick** over Server-Sent Events
//! - Map [`PanelError`](smartpanel_domain::error::PanelError) into HTTP
//!   status codes
//!
//! ## Dependency rule
//! Depends on `smartpanel-app` (panel handle, snapshot bus) and
//! `smartpanel-domain` (types used in request/response mapping). Never leaks
//! axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
