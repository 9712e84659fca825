//! Interactive session: playlist cursor plus fire-and-forget save workers.
//!
//! Every save command files the current entry under a category, starts a
//! worker for it and moves the cursor on, whether or not the save later
//! succeeds. Reaching the end is reported exactly once.

use crate::category::Category;
use crate::playlist::{Advance, Playlist};
use crate::worker::{spawn_save, InFlight, SaveContext, SaveEvent, SaveRequest};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no video to save")]
    NothingToSave,
}

/// What the front end should present next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cue {
    /// Present this entry (`number` is 1-based).
    Play { number: usize, url: String },
    /// Every entry has been handled.
    Complete,
}

/// A save that has been handed to a worker thread.
#[derive(Debug)]
pub struct SaveStarted {
    pub request: SaveRequest,
    pub handle: JoinHandle<()>,
    /// What to present now that the cursor has moved; `None` after completion was already reported.
    pub next: Option<Cue>,
}

pub struct Session {
    playlist: Playlist,
    ctx: Arc<SaveContext>,
    events: UnboundedSender<SaveEvent>,
    in_flight: InFlight,
    completion_reported: bool,
}

impl Session {
    /// Create a session and the receiver on which worker events arrive.
    pub fn new(playlist: Playlist, ctx: SaveContext) -> (Self, UnboundedReceiver<SaveEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Session {
            playlist,
            ctx: Arc::new(ctx),
            events: tx,
            in_flight: InFlight::default(),
            completion_reported: false,
        };
        (session, rx)
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn context(&self) -> &SaveContext {
        &self.ctx
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    pub fn is_finished(&self) -> bool {
        self.playlist.is_finished()
    }

    /// The first cue; `Complete` right away for an empty playlist.
    pub fn start(&mut self) -> Option<Cue> {
        self.cue()
    }

    /// Save the current entry under `category` and advance the cursor.
    pub fn save(&mut self, category: Category) -> Result<SaveStarted, SessionError> {
        let (index, url) = self.playlist.current().ok_or(SessionError::NothingToSave)?;
        let request = SaveRequest {
            url: url.to_string(),
            category,
            number: index + 1,
        };
        tracing::debug!(number = request.number, %category, "save requested");
        let handle = spawn_save(
            request.clone(),
            Arc::clone(&self.ctx),
            self.events.clone(),
            &self.in_flight,
        );

        let next = match self.playlist.advance() {
            Advance::Next(_) | Advance::Finished => self.cue(),
            Advance::AlreadyFinished => None,
        };
        Ok(SaveStarted {
            request,
            handle,
            next,
        })
    }

    fn cue(&mut self) -> Option<Cue> {
        match self.playlist.current() {
            Some((index, url)) => Some(Cue::Play {
                number: index + 1,
                url: url.to_string(),
            }),
            None if self.completion_reported => None,
            None => {
                self.completion_reported = true;
                tracing::info!(entries = self.playlist.len(), "playlist finished");
                Some(Cue::Complete)
            }
        }
    }
}
