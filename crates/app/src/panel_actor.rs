//! Panel actor: the single owner of the device registry.
//!
//! The simulation loop and the command interface never touch devices
//! directly. They send requests through a [`PanelHandle`]; one task applies
//! them in arrival order, so a tick's read-modify-write cannot interleave
//! with a user command.

use rand::Rng;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use smartpanel_domain::command::Command;
use smartpanel_domain::error::PanelError;
use smartpanel_domain::id::DeviceId;
use smartpanel_domain::panel::Panel;
use smartpanel_domain::snapshot::PanelSnapshot;
use smartpanel_domain::time::Timestamp;

/// Default depth of the request queue.
pub const DEFAULT_CAPACITY: usize = 64;

enum Request {
    Execute {
        command: Command,
        reply: oneshot::Sender<Result<(), PanelError>>,
    },
    Tick {
        now: Timestamp,
        reply: oneshot::Sender<PanelSnapshot>,
    },
    Snapshot {
        reply: oneshot::Sender<PanelSnapshot>,
    },
}

/// Task that owns the [`Panel`] and its random source.
pub struct PanelActor<R> {
    panel: Panel,
    rng: R,
    receiver: mpsc::Receiver<Request>,
}

impl<R: Rng + Send + 'static> PanelActor<R> {
    /// Spawn the actor on the current runtime.
    ///
    /// The task ends once every [`PanelHandle`] has been dropped and
    /// yields the final panel state.
    pub fn spawn(panel: Panel, rng: R, capacity: usize) -> (PanelHandle, JoinHandle<Panel>) {
        let (sender, receiver) = mpsc::channel(capacity);
        let actor = Self {
            panel,
            rng,
            receiver,
        };
        (PanelHandle { sender }, tokio::spawn(actor.run()))
    }

    async fn run(mut self) -> Panel {
        tracing::debug!(devices = self.panel.registry().len(), "panel actor started");
        while let Some(request) = self.receiver.recv().await {
            self.handle(request);
        }
        tracing::debug!("panel actor stopped");
        self.panel
    }

    fn handle(&mut self, request: Request) {
        match request {
            Request::Execute { command, reply } => {
                let result = self.panel.apply(&command, &mut self.rng);
                match &result {
                    Ok(()) => tracing::debug!(%command, "panel command applied"),
                    Err(err) => tracing::warn!(
                        %err,
                        %command,
                        device_id = command.device_id().map(DeviceId::as_str),
                        "ignoring panel command"
                    ),
                }
                let _ = reply.send(result);
            }
            Request::Tick { now, reply } => {
                let outcome = self.panel.tick(now, &mut self.rng);
                tracing::trace!(?outcome, "panel tick");
                let _ = reply.send(self.panel.snapshot());
            }
            Request::Snapshot { reply } => {
                let _ = reply.send(self.panel.snapshot());
            }
        }
    }
}

/// Cloneable access to the panel actor.
#[derive(Clone)]
pub struct PanelHandle {
    sender: mpsc::Sender<Request>,
}

impl PanelHandle {
    /// Apply a user command.
    ///
    /// # Errors
    ///
    /// Returns the command's [`PanelError`] (unknown device, unsupported
    /// command), or [`PanelError::Closed`] when the actor is gone.
    pub async fn execute(&self, command: Command) -> Result<(), PanelError> {
        self.request(|reply| Request::Execute { command, reply })
            .await?
    }

    /// Run one simulation step at `now` and return the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Closed`] when the actor is gone.
    pub async fn tick(&self, now: Timestamp) -> Result<PanelSnapshot, PanelError> {
        self.request(|reply| Request::Tick { now, reply }).await
    }

    /// Render the current state without changing it.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Closed`] when the actor is gone.
    pub async fn snapshot(&self) -> Result<PanelSnapshot, PanelError> {
        self.request(|reply| Request::Snapshot { reply }).await
    }

    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn toggle_power(&self, device_id: DeviceId) -> Result<(), PanelError> {
        self.execute(Command::TogglePower { device_id }).await
    }

    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_brightness(&self, device_id: DeviceId, value: i64) -> Result<(), PanelError> {
        self.execute(Command::SetBrightness { device_id, value })
            .await
    }

    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_temperature(&self, device_id: DeviceId, value: i64) -> Result<(), PanelError> {
        self.execute(Command::SetTemperature { device_id, value })
            .await
    }

    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn trigger_motion(&self, device_id: DeviceId) -> Result<(), PanelError> {
        self.execute(Command::TriggerMotion { device_id }).await
    }

    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_automation_enabled(&self, enabled: bool) -> Result<(), PanelError> {
        self.execute(Command::SetAutomationEnabled { enabled })
            .await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Request,
    ) -> Result<T, PanelError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(build(reply))
            .await
            .map_err(|_| PanelError::Closed)?;
        response.await.map_err(|_| PanelError::Closed)
    }
}
