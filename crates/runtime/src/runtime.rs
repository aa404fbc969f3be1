//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels,
//! and exposes a builder-based API for clients to start a game.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use fable_core::{Actor, PcgRng, Session, SessionEvent, WorldContent};

use crate::error::{Result, RuntimeError};
use crate::handle::RuntimeHandle;
use crate::scheduler::TurnScheduler;
use crate::worker::SessionWorker;

/// Runtime configuration shared across the orchestrator and the worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Pause between the player's combat action and the opponent's answer.
    pub turn_delay: Duration,
    /// Seed for the session's RNG; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            turn_delay: Duration::from_millis(1500),
            seed: None,
        }
    }
}

/// Main runtime that owns the session worker.
///
/// [`RuntimeHandle`] provides a cloneable facade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    pub fn builder(world: WorldContent, player: Actor) -> RuntimeBuilder {
        RuntimeBuilder::new(world, player)
    }

    /// Get a cloneable handle to this runtime.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.handle.subscribe_events()
    }

    /// Shutdown the runtime gracefully.
    ///
    /// The worker is told to stop explicitly, so shutdown completes even
    /// while cloned handles are still alive; those handles start failing
    /// with [`RuntimeError::CommandChannelClosed`] once the worker exits.
    pub async fn shutdown(self) -> Result<()> {
        self.handle.request_shutdown().await;
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    world: WorldContent,
    player: Actor,
}

impl RuntimeBuilder {
    fn new(world: WorldContent, player: Actor) -> Self {
        Self {
            config: RuntimeConfig::default(),
            world,
            player,
        }
    }

    /// Override runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn turn_delay(mut self, delay: Duration) -> Self {
        self.config.turn_delay = delay;
        self
    }

    /// Spawn the worker and return the running runtime.
    ///
    /// Must be called within a tokio runtime.
    pub fn build(self) -> Runtime {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        info!(world = self.world.name, seed, "starting runtime");

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let (event_tx, _) = broadcast::channel(self.config.event_buffer_size);

        let session = Session::new(self.world, self.player, PcgRng::new(seed));
        let scheduler = TurnScheduler::new(command_tx.downgrade(), self.config.turn_delay);
        let worker = SessionWorker::new(session, command_rx, event_tx.clone(), scheduler);
        let worker_handle = tokio::spawn(worker.run());

        Runtime {
            handle: RuntimeHandle::new(command_tx, event_tx),
            worker_handle,
        }
    }
}
