//! Async runtime that drives a [`fable_core::Session`].
//!
//! The session itself is synchronous and deterministic; this crate wraps it
//! in a background worker task so that clients stay responsive while the
//! opponent's half of a combat turn resolves on a delay. Clients interact
//! through a cloneable [`RuntimeHandle`]: commands go in over an mpsc
//! channel, session events come back over a broadcast channel, and full
//! state snapshots are available on request.

mod error;
mod handle;
mod runtime;
mod scheduler;
mod worker;

pub use error::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
