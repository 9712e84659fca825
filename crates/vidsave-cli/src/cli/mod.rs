//! CLI for vidsave.

mod commands;
mod prompt;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vidsave_core::category::Category;
use vidsave_core::config::{self, VidsaveConfig};

use commands::{run_completions, run_list, run_manpage, run_play, run_save};

/// Top-level CLI for vidsave.
#[derive(Debug, Parser)]
#[command(name = "vidsave")]
#[command(
    about = "Step through a list of video URLs and save chosen clips as categorized audio",
    long_about = None
)]
pub struct Cli {
    /// Defaults to `play` when omitted.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

/// Per-invocation overrides for values from config.toml.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Playlist file (one URL per line).
    #[arg(long, value_name = "FILE")]
    pub playlist: Option<PathBuf>,

    /// Directory under which the `sound/<category>` folders are created.
    #[arg(long, value_name = "DIR")]
    pub output_root: Option<PathBuf>,

    /// Converter program, called as `<PROGRAM> -y -i <video> <audio>`.
    #[arg(long, value_name = "PROGRAM")]
    pub converter: Option<String>,
}

impl Overrides {
    pub fn apply(&self, cfg: &mut VidsaveConfig) {
        if let Some(p) = &self.playlist {
            cfg.playlist_path = p.clone();
        }
        if let Some(d) = &self.output_root {
            cfg.output_root = d.clone();
        }
        if let Some(c) = &self.converter {
            cfg.converter = c.clone();
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Step through the playlist interactively and save entries by category.
    Play {
        #[command(flatten)]
        overrides: Overrides,

        /// External player started with each entry's URL.
        #[arg(long, value_name = "PROGRAM")]
        player: Option<String>,
    },

    /// Print the playlist with sequence numbers.
    List {
        #[command(flatten)]
        overrides: Overrides,
    },

    /// Download one URL, file it under a category and convert it to audio.
    Save {
        /// Direct HTTP/HTTPS URL of the video.
        url: String,

        /// Category: mute, music, voice, mix, noise (or 1-5).
        category: Category,

        /// Sequence number used in the file name (`video_<N>.wav`).
        number: usize,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Print shell completions to stdout.
    Completions {
        shell: clap_complete::Shell,
    },

    /// Print a roff man page to stdout.
    Manpage,
}

fn load_config(overrides: &Overrides) -> Result<VidsaveConfig> {
    let mut cfg = config::load_or_init()?;
    overrides.apply(&mut cfg);
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let command = cli.command.unwrap_or(CliCommand::Play {
            overrides: Overrides::default(),
            player: None,
        });

        match command {
            CliCommand::Play { overrides, player } => {
                let mut cfg = load_config(&overrides)?;
                if player.is_some() {
                    cfg.player = player;
                }
                run_play(&cfg).await?;
            }
            CliCommand::List { overrides } => run_list(&load_config(&overrides)?)?,
            CliCommand::Save {
                url,
                category,
                number,
                overrides,
            } => run_save(&load_config(&overrides)?, url, category, number).await?,
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Manpage => run_manpage()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
