//! Delayed opponent-turn scheduling.
//!
//! When a player combat action leaves the session awaiting the opponent,
//! the scheduler arms a oneshot timer that injects
//! [`Command::ResolveOpponentTurn`] back into the worker after a fixed
//! delay. Cancel-and-replace semantics keep at most one timer armed, so a
//! session never sees two resolutions for the same turn.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use fable_core::{Command, SessionPhase, TurnPhase};

use crate::worker::WorkerCommand;

pub(crate) struct TurnScheduler {
    // Weak so the worker's own scheduler never keeps its command channel
    // open; the worker still exits when every client handle is dropped.
    command_tx: mpsc::WeakSender<WorkerCommand>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl TurnScheduler {
    pub(crate) fn new(command_tx: mpsc::WeakSender<WorkerCommand>, delay: Duration) -> Self {
        Self {
            command_tx,
            delay,
            pending: None,
        }
    }

    /// Bring the timer in line with the session phase after a command.
    ///
    /// Entering `AwaitingOpponentResolution` arms (or re-arms) the timer;
    /// any other phase disarms it.
    pub(crate) fn sync(&mut self, phase: SessionPhase) {
        match phase {
            SessionPhase::InCombat {
                turn: TurnPhase::AwaitingOpponentResolution,
            } => self.arm(),
            _ => self.cancel(),
        }
    }

    fn arm(&mut self) {
        self.cancel();
        let command_tx = self.command_tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("opponent turn timer fired");
            // The worker rejects this if the fight ended in the meantime.
            if let Some(command_tx) = command_tx.upgrade() {
                let _ = command_tx
                    .send(WorkerCommand::System {
                        command: Command::ResolveOpponentTurn,
                    })
                    .await;
            }
        }));
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl Drop for TurnScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
