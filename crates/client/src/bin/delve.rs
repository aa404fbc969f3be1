//! `delve`: the dungeon crawler with a positioned map view.

use anyhow::Result;
use fable_client::AppOptions;
use fable_runtime::Runtime;

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = fable_client::logging::init("delve")?;

    let runtime = Runtime::builder(fable_content::delve::world(), fable_content::delve::player())
        .build();

    fable_client::run(
        runtime,
        AppOptions {
            title: "Dungeon Delve",
            show_map: true,
        },
    )
    .await
}
