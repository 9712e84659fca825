//! The five fixed destination categories a saved clip can be filed under.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Destination folder for a saved clip, named after the audio content it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Mute,
    Music,
    Voice,
    Mix,
    Noise,
}

impl Category {
    /// All categories in prompt order (`1` = mute ... `5` = noise).
    pub const ALL: [Category; 5] = [
        Category::Mute,
        Category::Music,
        Category::Voice,
        Category::Mix,
        Category::Noise,
    ];

    /// Short command name, e.g. `music`.
    pub fn name(self) -> &'static str {
        match self {
            Category::Mute => "mute",
            Category::Music => "music",
            Category::Voice => "voice",
            Category::Mix => "mix",
            Category::Noise => "noise",
        }
    }

    /// Folder path relative to the output root, e.g. `sound/music`.
    pub fn folder(self) -> &'static str {
        match self {
            Category::Mute => "sound/mute",
            Category::Music => "sound/music",
            Category::Voice => "sound/voice",
            Category::Mix => "sound/mix",
            Category::Noise => "sound/noise",
        }
    }

    /// Human label shown in prompt help.
    pub fn label(self) -> &'static str {
        match self {
            Category::Mute => "silence",
            Category::Music => "music",
            Category::Voice => "voice",
            Category::Mix => "voice mixed with music",
            Category::Noise => "noise",
        }
    }

    /// Absolute-or-relative directory for this category under `root`.
    pub fn dir_under(self, root: &Path) -> PathBuf {
        root.join(self.folder())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category {0:?} (expected 1-5 or one of: mute, music, voice, mix, noise)")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    /// Accepts the command name (case-insensitive) or its 1-based prompt digit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if let Ok(n) = t.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| Category::ALL.get(i).copied())
                .ok_or_else(|| CategoryParseError(s.to_string()));
        }
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(t))
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_by_name_and_digit() {
        assert_eq!("music".parse::<Category>().unwrap(), Category::Music);
        assert_eq!(" NOISE ".parse::<Category>().unwrap(), Category::Noise);
        assert_eq!("1".parse::<Category>().unwrap(), Category::Mute);
        assert_eq!("4".parse::<Category>().unwrap(), Category::Mix);
    }

    #[test]
    fn parse_rejects_out_of_range_and_unknown() {
        assert!("0".parse::<Category>().is_err());
        assert!("6".parse::<Category>().is_err());
        assert!("drums".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn folders_are_distinct_and_under_sound() {
        let folders: std::collections::HashSet<_> =
            Category::ALL.iter().map(|c| c.folder()).collect();
        assert_eq!(folders.len(), 5);
        assert!(folders.iter().all(|f| f.starts_with("sound/")));
        assert_eq!(
            Category::Voice.dir_under(Path::new("/out")),
            PathBuf::from("/out/sound/voice")
        );
    }
}
