//! Simulation loop: the periodic tick that drives the panel.
//!
//! Each iteration asks the panel actor for one tick (rule, then
//! randomizer, when automation is on) and publishes the resulting snapshot.
//! The next iteration starts one full period after the previous one
//! *finished*, so a slow tick delays the schedule instead of piling up.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use smartpanel_domain::error::PanelError;

use crate::panel_actor::PanelHandle;
use crate::ports::{Clock, SnapshotPublisher};

/// Time between the end of one tick and the start of the next.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(2);

/// Background task running the simulation until stopped.
pub struct SimulationLoop<C, P> {
    panel: PanelHandle,
    clock: C,
    publisher: P,
    period: Duration,
    stop: watch::Receiver<bool>,
}

impl<C, P> SimulationLoop<C, P>
where
    C: Clock + 'static,
    P: SnapshotPublisher + 'static,
{
    /// Spawn the loop. The first tick runs immediately.
    pub fn start(panel: PanelHandle, clock: C, publisher: P, period: Duration) -> SimulationTask {
        let (stop_tx, stop_rx) = watch::channel(false);
        let simulation = Self {
            panel,
            clock,
            publisher,
            period,
            stop: stop_rx,
        };
        tracing::info!(
            period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX),
            "simulation loop started"
        );
        SimulationTask {
            stop: stop_tx,
            handle: tokio::spawn(simulation.run()),
        }
    }

    async fn run(mut self) {
        loop {
            if *self.stop.borrow() {
                break;
            }
            if let Err(err) = self.iterate().await {
                tracing::warn!(%err, "simulation tick failed, retrying next period");
            }
            tokio::select! {
                () = tokio::time::sleep(self.period) => {}
                changed = self.stop.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        tracing::info!("simulation loop stopped");
    }

    async fn iterate(&self) -> Result<(), PanelError> {
        let snapshot = self.panel.tick(self.clock.now()).await?;
        self.publisher.publish(snapshot).await
    }
}

/// Control over a running [`SimulationLoop`].
///
/// Dropping it stops the loop at its next check as well.
pub struct SimulationTask {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SimulationTask {
    /// Ask the loop to stop and wait for it. A tick already in progress is
    /// allowed to finish.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        if let Err(err) = self.handle.await {
            tracing::error!(%err, "simulation loop panicked");
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
