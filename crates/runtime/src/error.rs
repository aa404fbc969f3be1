//! Errors surfaced by the runtime API.
//!
//! Game-rule failures pass through as [`fable_core::CoreError`]; everything
//! else is channel or task plumbing, which only happens during shutdown.

use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A game rule rejected the command. Callers consult
    /// [`fable_core::CoreError::is_silent`] to decide whether to surface it.
    #[error(transparent)]
    Core(#[from] fable_core::CoreError),

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
