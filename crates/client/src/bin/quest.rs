//! `quest`: the turn-based RPG battle demo.

use anyhow::Result;
use fable_client::AppOptions;
use fable_runtime::Runtime;

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = fable_client::logging::init("quest")?;

    let runtime = Runtime::builder(fable_content::quest::world(), fable_content::quest::player())
        .build();

    fable_client::run(
        runtime,
        AppOptions {
            title: "Fantasy Quest",
            show_map: false,
        },
    )
    .await
}
