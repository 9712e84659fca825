//! `vidsave list` – print the playlist.

use anyhow::Result;
use vidsave_core::config::VidsaveConfig;
use vidsave_core::playlist::Playlist;

pub fn run_list(cfg: &VidsaveConfig) -> Result<()> {
    let playlist = Playlist::load(&cfg.playlist_path)?;
    if playlist.is_empty() {
        println!("Playlist {} is empty.", cfg.playlist_path.display());
        return Ok(());
    }
    println!("{:<6} URL", "N");
    for (i, url) in playlist.entries().iter().enumerate() {
        println!("{:<6} {}", i + 1, url);
    }
    Ok(())
}
