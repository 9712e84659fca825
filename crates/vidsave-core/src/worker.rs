//! Save worker: download one clip into its category folder and convert it to audio.
//!
//! Each save runs on its own OS thread and reports progress on an unbounded
//! channel. Workers share nothing but the read-only `SaveContext`; two saves
//! never touch the same file because sequence numbers are unique per session.

use crate::category::Category;
use crate::convert::{ConvertError, Converter};
use crate::fetch::{fetch_to_file, FetchError, FetchOptions};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("download failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("conversion failed: {0}")]
    Convert(#[from] ConvertError),
}

/// One save command: which URL, where it goes, and its 1-based sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub url: String,
    pub category: Category,
    pub number: usize,
}

impl SaveRequest {
    pub fn dir(&self, root: &Path) -> PathBuf {
        self.category.dir_under(root)
    }

    /// `<root>/<category>/video_<n>.mp4`
    pub fn video_path(&self, root: &Path) -> PathBuf {
        self.dir(root).join(format!("video_{}.mp4", self.number))
    }

    /// `<root>/<category>/video_<n>.wav`
    pub fn audio_path(&self, root: &Path) -> PathBuf {
        self.dir(root).join(format!("video_{}.wav", self.number))
    }
}

/// Read-only settings shared by every worker.
#[derive(Debug, Clone)]
pub struct SaveContext {
    pub output_root: PathBuf,
    pub fetch: FetchOptions,
    pub converter: Converter,
}

/// Progress reported by a worker thread.
#[derive(Debug, Clone)]
pub enum SaveEvent {
    Downloading {
        number: usize,
        video: PathBuf,
    },
    Downloaded {
        number: usize,
        video: PathBuf,
        bytes: u64,
    },
    Saved {
        number: usize,
        audio: PathBuf,
    },
    Failed {
        number: usize,
        category: Category,
        error: String,
    },
}

/// Where the saved audio ended up.
#[derive(Debug, Clone)]
pub struct SavedClip {
    pub audio: PathBuf,
    pub bytes: u64,
}

/// Run a save to completion on the current thread.
///
/// `notify` is called for the intermediate `Downloading`/`Downloaded` steps;
/// the final outcome is the return value.
pub fn save_clip(
    req: &SaveRequest,
    ctx: &SaveContext,
    mut notify: impl FnMut(SaveEvent),
) -> Result<SavedClip, SaveError> {
    let dir = req.dir(&ctx.output_root);
    fs::create_dir_all(&dir).map_err(|source| SaveError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let video = req.video_path(&ctx.output_root);
    let audio = req.audio_path(&ctx.output_root);

    tracing::info!(number = req.number, url = %req.url, video = %video.display(), "saving");
    notify(SaveEvent::Downloading {
        number: req.number,
        video: video.clone(),
    });
    let bytes = fetch_to_file(&req.url, &video, &ctx.fetch)?;
    tracing::info!(number = req.number, bytes, "downloaded {}", video.display());
    notify(SaveEvent::Downloaded {
        number: req.number,
        video: video.clone(),
        bytes,
    });

    ctx.converter.convert_and_remove(&video, &audio)?;
    tracing::info!(number = req.number, "converted {}", audio.display());
    Ok(SavedClip { audio, bytes })
}

/// Number of worker threads that have not finished yet.
#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn enter(counter: &InFlight) -> Self {
        counter.0.fetch_add(1, Ordering::SeqCst);
        InFlightGuard(Arc::clone(&counter.0))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Spawn a detached worker thread for `req`. Every step and the final outcome
/// are sent on `events`; a closed receiver is ignored.
///
/// The handle may be dropped; it is returned so callers that care can join.
pub fn spawn_save(
    req: SaveRequest,
    ctx: Arc<SaveContext>,
    events: UnboundedSender<SaveEvent>,
    in_flight: &InFlight,
) -> JoinHandle<()> {
    let guard = InFlightGuard::enter(in_flight);
    std::thread::spawn(move || {
        let _guard = guard;
        let result = save_clip(&req, &ctx, |ev| {
            let _ = events.send(ev);
        });
        let event = match result {
            Ok(clip) => SaveEvent::Saved {
                number: req.number,
                audio: clip.audio,
            },
            Err(e) => {
                tracing::error!(number = req.number, url = %req.url, "save failed: {}", e);
                SaveEvent::Failed {
                    number: req.number,
                    category: req.category,
                    error: e.to_string(),
                }
            }
        };
        let _ = events.send(event);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(number: usize) -> SaveRequest {
        SaveRequest {
            url: "https://v.example/clip.mp4".to_string(),
            category: Category::Music,
            number,
        }
    }

    #[test]
    fn request_paths() {
        let r = req(3);
        let root = Path::new("/data");
        assert_eq!(r.video_path(root), PathBuf::from("/data/sound/music/video_3.mp4"));
        assert_eq!(r.audio_path(root), PathBuf::from("/data/sound/music/video_3.wav"));
    }

    #[test]
    fn failed_download_reports_failure_and_no_audio() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Arc::new(SaveContext {
            output_root: dir.path().to_path_buf(),
            fetch: FetchOptions::default(),
            converter: Converter::new("true"),
        });
        let mut r = req(1);
        r.url = "http://127.0.0.1:9/clip.mp4".to_string();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let in_flight = InFlight::default();
        let handle = spawn_save(r.clone(), ctx, tx, &in_flight);
        handle.join().unwrap();
        assert_eq!(in_flight.get(), 0);

        let mut last = None;
        while let Ok(ev) = rx.try_recv() {
            last = Some(ev);
        }
        match last {
            Some(SaveEvent::Failed { number, category, .. }) => {
                assert_eq!(number, 1);
                assert_eq!(category, Category::Music);
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        assert!(dir.path().join("sound/music").is_dir());
        assert!(!r.audio_path(dir.path()).exists());
    }
}
