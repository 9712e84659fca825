//! `vidsave play` – the interactive session.
//!
//! stdin is read on a dedicated thread and forwarded over a channel, so the
//! loop below only ever waits on two receivers: typed lines and worker events.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use vidsave_core::config::VidsaveConfig;
use vidsave_core::convert::Converter;
use vidsave_core::fetch::FetchOptions;
use vidsave_core::player::Player;
use vidsave_core::playlist::Playlist;
use vidsave_core::session::{Cue, Session};
use vidsave_core::worker::{SaveContext, SaveEvent};

use crate::cli::prompt::{help_text, PromptCommand};

pub fn save_context(cfg: &VidsaveConfig) -> SaveContext {
    SaveContext {
        output_root: cfg.output_root.clone(),
        fetch: FetchOptions::from(&cfg.http),
        converter: Converter::new(cfg.converter.clone()),
    }
}

pub fn write_event(out: &mut impl Write, err: &mut impl Write, ev: &SaveEvent) -> io::Result<()> {
    match ev {
        SaveEvent::Downloading { number, video } => {
            writeln!(out, "[#{}] saving {} ...", number, video.display())
        }
        SaveEvent::Downloaded {
            number,
            video,
            bytes,
        } => writeln!(out, "[#{}] saved {} ({} bytes)", number, video.display(), bytes),
        SaveEvent::Saved { number, audio } => {
            writeln!(out, "[#{}] converted: {}", number, audio.display())
        }
        SaveEvent::Failed {
            number,
            category,
            error,
        } => writeln!(
            err,
            "[#{}] error: save to {} failed: {}",
            number,
            category.folder(),
            error
        ),
    }
}

pub fn print_event(ev: &SaveEvent) {
    let _ = write_event(&mut io::stdout(), &mut io::stderr(), ev);
}

fn spawn_stdin_reader() -> UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn present(
    cue: &Cue,
    total: usize,
    player: &mut Player,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    match cue {
        Cue::Play { number, url } => {
            writeln!(out, "Now playing #{}/{}: {}", number, total, url)?;
            tracing::info!(number, %url, "now playing");
            if let Err(e) = player.play(url) {
                tracing::warn!("player failed to start: {}", e);
                writeln!(err, "warning: player failed to start: {}", e)?;
            }
        }
        Cue::Complete => {
            player.stop();
            writeln!(out, "All videos have been played.")?;
        }
    }
    Ok(())
}

pub async fn run_play(cfg: &VidsaveConfig) -> Result<()> {
    let playlist = Playlist::load(&cfg.playlist_path)?;
    let (mut session, events) = Session::new(playlist, save_context(cfg));
    let mut player = Player::new(cfg.player.clone());
    run_prompt(
        &mut session,
        events,
        spawn_stdin_reader(),
        &mut player,
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await
}

/// The prompt loop: handles typed `lines` and worker `events` until `quit` or
/// until `lines` closes.
pub async fn run_prompt(
    session: &mut Session,
    mut events: UnboundedReceiver<SaveEvent>,
    mut lines: UnboundedReceiver<String>,
    player: &mut Player,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    let total = session.playlist().len();
    writeln!(out, "{}", help_text())?;
    if let Some(cue) = session.start() {
        present(&cue, total, player, out, err)?;
    }

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                let cmd = match PromptCommand::parse(&line) {
                    Ok(cmd) => cmd,
                    Err(e) => {
                        writeln!(err, "{}", e)?;
                        continue;
                    }
                };
                match cmd {
                    PromptCommand::Save(category) => match session.save(category) {
                        Ok(started) => {
                            writeln!(
                                out,
                                "[#{}] queued for {}",
                                started.request.number,
                                category.folder()
                            )?;
                            if let Some(cue) = started.next {
                                present(&cue, total, player, out, err)?;
                            }
                        }
                        Err(e) => writeln!(err, "warning: {}", e)?,
                    },
                    PromptCommand::List => {
                        for (i, url) in session.playlist().remaining() {
                            writeln!(out, "{:<6} {}", i + 1, url)?;
                        }
                    }
                    PromptCommand::Status => {
                        let position = if session.is_finished() {
                            "finished".to_string()
                        } else {
                            format!("#{}/{}", session.playlist().cursor() + 1, total)
                        };
                        writeln!(
                            out,
                            "position: {}  saves in flight: {}  converter: {}",
                            position,
                            session.in_flight(),
                            session.context().converter.program()
                        )?;
                    }
                    PromptCommand::Help => writeln!(out, "{}", help_text())?,
                    PromptCommand::Quit => break,
                    PromptCommand::Nothing => {}
                }
            }
            Some(ev) = events.recv() => write_event(out, err, &ev)?,
        }
    }

    let pending = session.in_flight();
    if pending > 0 {
        tracing::warn!(pending, "exiting with saves still in flight");
        writeln!(err, "warning: abandoning {} save(s) still in progress", pending)?;
    }
    Ok(())
}
