//! Playlist loading and the "currently playing" cursor.
//!
//! A playlist is read once from a plain text file (one URL per line). The
//! entries never change afterwards; only the cursor moves, one step per save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    #[error("playlist file not found: {}", .0.display())]
    FileMissing(PathBuf),
    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of moving the cursor forward by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Cursor now points at this index.
    Next(usize),
    /// Cursor just moved past the last entry.
    Finished,
    /// Cursor was already past the last entry; nothing moved.
    AlreadyFinished,
}

#[derive(Debug, Clone)]
pub struct Playlist {
    entries: Vec<String>,
    cursor: usize,
}

impl Playlist {
    /// Load a playlist from `path`. Blank lines are skipped, the rest trimmed.
    pub fn load(path: &Path) -> Result<Self, PlaylistError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PlaylistError::FileMissing(path.to_path_buf()),
            _ => PlaylistError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let playlist = Self::parse(&text);
        tracing::info!(
            path = %path.display(),
            entries = playlist.len(),
            "playlist loaded"
        );
        Ok(playlist)
    }

    /// Build a playlist from file contents. `\n`, `\r\n` and a lone `\r` all end a line.
    pub fn parse(text: &str) -> Self {
        let entries: Vec<String> = text
            .split(|c: char| c == '\n' || c == '\r')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        for (i, entry) in entries.iter().enumerate() {
            if !looks_like_http_url(entry) {
                tracing::warn!(number = i + 1, entry = %entry, "playlist entry is not an http(s) URL");
            }
        }
        Playlist { entries, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    /// Current entry as `(index, url)`, or `None` once finished.
    pub fn current(&self) -> Option<(usize, &str)> {
        self.entries
            .get(self.cursor)
            .map(|url| (self.cursor, url.as_str()))
    }

    /// Entries from the cursor onwards, with their indices.
    pub fn remaining(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries
            .iter()
            .enumerate()
            .skip(self.cursor)
            .map(|(i, u)| (i, u.as_str()))
    }

    pub fn advance(&mut self) -> Advance {
        if self.is_finished() {
            return Advance::AlreadyFinished;
        }
        self.cursor += 1;
        if self.is_finished() {
            Advance::Finished
        } else {
            Advance::Next(self.cursor)
        }
    }
}

fn looks_like_http_url(s: &str) -> bool {
    url::Url::parse(s)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_skips_blank_lines_and_keeps_order() {
        let text = "https://a.example/1.mp4\n\n   \nhttps://a.example/2.mp4\r\n  https://a.example/3.mp4  \n";
        let p = Playlist::parse(text);
        assert_eq!(
            p.entries(),
            &[
                "https://a.example/1.mp4".to_string(),
                "https://a.example/2.mp4".to_string(),
                "https://a.example/3.mp4".to_string(),
            ]
        );
        assert_eq!(p.cursor(), 0);
    }

    #[test]
    fn parse_accepts_lone_carriage_returns() {
        let p = Playlist::parse("https://a.example/1.mp4\rhttps://a.example/2.mp4\r\rhttps://a.example/3.mp4\r");
        assert_eq!(p.len(), 3);
        assert_eq!(p.entries()[1], "https://a.example/2.mp4");
    }

    #[test]
    fn parse_keeps_entries_that_are_not_urls() {
        let p = Playlist::parse("not a url\nftp://host/x\n");
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "https://a.example/1.mp4").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "https://a.example/2.mp4").unwrap();
        f.flush().unwrap();
        let p = Playlist::load(f.path()).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.current(), Some((0, "https://a.example/1.mp4")));
    }

    #[test]
    fn load_missing_file_is_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls_list.txt");
        match Playlist::load(&path) {
            Err(PlaylistError::FileMissing(p)) => assert_eq!(p, path),
            other => panic!("expected FileMissing, got {:?}", other),
        }
    }

    #[test]
    fn advance_reports_finished_once() {
        let mut p = Playlist::parse("a\nb\n");
        assert_eq!(p.advance(), Advance::Next(1));
        assert_eq!(p.current(), Some((1, "b")));
        assert_eq!(p.advance(), Advance::Finished);
        assert!(p.is_finished());
        assert_eq!(p.current(), None);
        assert_eq!(p.advance(), Advance::AlreadyFinished);
        assert_eq!(p.cursor(), 2);
    }

    #[test]
    fn empty_playlist_starts_finished() {
        let mut p = Playlist::parse("\n\n");
        assert!(p.is_empty());
        assert!(p.is_finished());
        assert_eq!(p.advance(), Advance::AlreadyFinished);
    }

    #[test]
    fn remaining_starts_at_cursor() {
        let mut p = Playlist::parse("a\nb\nc\n");
        p.advance();
        let rest: Vec<_> = p.remaining().collect();
        assert_eq!(rest, vec![(1, "b"), (2, "c")]);
    }
}
