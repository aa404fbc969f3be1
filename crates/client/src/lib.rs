//! Terminal frontends for the fable games.
//!
//! One shared application shell drives both binaries: `quest` (the
//! turn-based battle demo) and `delve` (the dungeon crawler with a map
//! view). The shell renders from runtime snapshots and translates key
//! presses into session commands; all game rules live in `fable-core`.

pub mod app;
pub mod logging;
pub mod menu;
pub mod terminal;
pub mod widgets;

use anyhow::Result;
use fable_runtime::Runtime;

pub use app::{App, AppOptions};

/// Run an application shell against a runtime, restoring the terminal on
/// the way out even when the app errors.
pub async fn run(runtime: Runtime, options: AppOptions) -> Result<()> {
    let app = App::new(runtime.handle(), options).await?;

    let mut tui = terminal::init()?;
    let result = app.run(&mut tui).await;
    terminal::restore()?;

    runtime.shutdown().await?;
    result
}
