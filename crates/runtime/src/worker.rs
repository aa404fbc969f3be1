//! Session worker that owns the authoritative [`fable_core::Session`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), applies
//! them through the session reducer, publishes the resulting events on the
//! broadcast channel, and keeps the turn scheduler in sync with the phase.

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

use fable_core::{Command, PcgRng, Session, SessionEvent};

use crate::Result;
use crate::scheduler::TurnScheduler;

/// Commands processed by the session worker.
pub(crate) enum WorkerCommand {
    /// Apply a player command and report the outcome.
    Apply {
        command: Command,
        reply: oneshot::Sender<Result<Vec<SessionEvent>>>,
    },
    /// Apply a command injected by the runtime itself (no caller waiting).
    System { command: Command },
    /// Clone the current session state for rendering.
    Snapshot {
        reply: oneshot::Sender<Session<PcgRng>>,
    },
    /// Stop the worker even while client handles are still alive.
    Shutdown,
}

/// Background task that serializes all session mutation.
pub(crate) struct SessionWorker {
    session: Session<PcgRng>,
    command_rx: mpsc::Receiver<WorkerCommand>,
    event_tx: broadcast::Sender<SessionEvent>,
    scheduler: TurnScheduler,
}

impl SessionWorker {
    pub(crate) fn new(
        session: Session<PcgRng>,
        command_rx: mpsc::Receiver<WorkerCommand>,
        event_tx: broadcast::Sender<SessionEvent>,
        scheduler: TurnScheduler,
    ) -> Self {
        info!(
            world = session.content().name,
            player = %session.player().name,
            "session worker initialized"
        );
        Self {
            session,
            command_rx,
            event_tx,
            scheduler,
        }
    }

    pub(crate) async fn run(mut self) {
        // Exits on an explicit shutdown command or when every sender is
        // gone, whichever comes first.
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                WorkerCommand::Shutdown => break,
                cmd => self.handle_command(cmd),
            }
        }
        self.scheduler.cancel();
        debug!("session worker shutting down");
    }

    fn handle_command(&mut self, cmd: WorkerCommand) {
        match cmd {
            WorkerCommand::Apply { command, reply } => {
                let result = self.apply(command);
                if reply.send(result.map_err(Into::into)).is_err() {
                    debug!("apply reply channel closed (caller dropped)");
                }
            }
            WorkerCommand::System { command } => {
                match self.apply(command) {
                    Ok(_) => {}
                    // A stale resolution after the fight already ended:
                    // the phase check rejects it and we drop it here.
                    Err(err) if err.is_silent() => {
                        debug!(%err, "dropped stale system command");
                    }
                    Err(err) => warn!(%err, "system command failed"),
                }
            }
            WorkerCommand::Snapshot { reply } => {
                if reply.send(self.session.clone()).is_err() {
                    debug!("snapshot reply channel closed (caller dropped)");
                }
            }
            // Shutdown never reaches here; the run loop consumes it.
            WorkerCommand::Shutdown => {}
        }
    }

    fn apply(&mut self, command: Command) -> fable_core::error::CoreResult<Vec<SessionEvent>> {
        let events = self.session.handle(command)?;
        for event in &events {
            // Lagging or absent subscribers are fine; events are advisory
            // and the snapshot API carries the authoritative state.
            let _ = self.event_tx.send(event.clone());
        }
        self.scheduler.sync(self.session.phase());
        Ok(events)
    }
}
