//! Cloneable client-facing handle to a running session.

use tokio::sync::{broadcast, mpsc, oneshot};

use fable_core::{Command, PcgRng, Session, SessionEvent};

use crate::error::{Result, RuntimeError};
use crate::worker::WorkerCommand;

#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<WorkerCommand>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<WorkerCommand>,
        event_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Apply a player command and wait for its outcome.
    pub async fn apply(&self, command: Command) -> Result<Vec<SessionEvent>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(WorkerCommand::Apply {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Clone the current session state for rendering.
    pub async fn snapshot(&self) -> Result<Session<PcgRng>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(WorkerCommand::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to session events, including scheduler-driven opponent
    /// turns that no `apply` call observes directly.
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Tell the worker to stop. A send error means it already has.
    pub(crate) async fn request_shutdown(&self) {
        let _ = self.command_tx.send(WorkerCommand::Shutdown).await;
    }
}
