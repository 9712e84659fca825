//! `vidsave save` – one synchronous save, outside the interactive session.

use anyhow::{Context, Result};
use vidsave_core::category::Category;
use vidsave_core::config::VidsaveConfig;
use vidsave_core::worker::{save_clip, SaveRequest};

use super::play::{print_event, save_context};

pub async fn run_save(
    cfg: &VidsaveConfig,
    url: String,
    category: Category,
    number: usize,
) -> Result<()> {
    let ctx = save_context(cfg);
    let req = SaveRequest {
        url,
        category,
        number,
    };
    // curl and the converter block; keep them off the runtime workers.
    let clip = tokio::task::spawn_blocking(move || save_clip(&req, &ctx, |ev| print_event(&ev)))
        .await
        .context("save task panicked")??;
    println!("Converted: {}", clip.audio.display());
    Ok(())
}
