//! # smartpaneld: smart panel daemon
//!
//! Composition root that wires the panel, the simulation loop and the HTTP
//! adapter together.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Build the device registry and spawn the panel actor
//! - Start the simulation loop, publishing to the snapshot bus
//! - Build the axum router and serve
//! - Drain connections, then stop the loop on shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;
mod console;

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use smartpanel_adapter_http_axum::state::AppState;
use smartpanel_app::panel_actor::{DEFAULT_CAPACITY, PanelActor};
use smartpanel_app::ports::SystemClock;
use smartpanel_app::simulation::SimulationLoop;
use smartpanel_app::snapshot_bus::SnapshotBus;
use smartpanel_domain::panel::Panel;
use smartpanel_domain::rule::MotionLightsRule;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter)?;

    // Panel
    let registry = config.registry()?;
    let panel = Panel::new(registry, MotionLightsRule::new(config.idle_timeout()))
        .with_automation(config.simulation.automation_enabled);
    let rng = match config.simulation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(
        devices = panel.registry().len(),
        idle_timeout_secs = panel.rule().idle_timeout().as_secs(),
        automation = panel.automation_enabled(),
        "panel ready"
    );
    let (panel, actor) = PanelActor::spawn(panel, rng, DEFAULT_CAPACITY);

    // Snapshot bus
    let snapshots = Arc::new(SnapshotBus::new(64));
    let console = console::spawn(snapshots.subscribe());

    // Simulation
    let simulation = SimulationLoop::start(
        panel.clone(),
        SystemClock,
        Arc::clone(&snapshots),
        config.tick_period(),
    );

    // HTTP
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let state = AppState::new(panel, snapshots).with_shutdown(shutdown_rx);
    let app = smartpanel_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "smartpaneld listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("shutdown signal received");
            // ends open snapshot streams so their connections can drain
            let _ = shutdown_tx.send(true);
        })
        .await?;

    simulation.stop().await;
    // With every connection drained and the loop gone, no handle or bus
    // reference is left.
    match actor.await {
        Ok(panel) => tracing::info!(devices = panel.registry().len(), "panel stopped"),
        Err(err) => tracing::error!(%err, "panel actor panicked"),
    }
    if let Err(err) = console.await {
        tracing::error!(%err, "console task panicked");
    }

    Ok(())
}

fn init_tracing(filter: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_new(filter)?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
