//! Audio extraction via an external converter (ffmpeg-compatible CLI).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Bytes of converter stderr kept for the error message.
const STDERR_TAIL: usize = 2048;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("could not start converter {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("converter exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("remove {}: {source}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An external transcoder invoked as `<program> -y -i <input> <output>`.
#[derive(Debug, Clone)]
pub struct Converter {
    program: String,
}

impl Converter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the converter once. Arguments go straight to the process, no shell.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<(), ConvertError> {
        tracing::debug!(
            program = %self.program,
            input = %input.display(),
            output = %output.display(),
            "running converter"
        );
        let out = Command::new(&self.program)
            .arg("-y")
            .arg("-i")
            .arg(input)
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ConvertError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !out.status.success() {
            return Err(ConvertError::Failed {
                status: out.status,
                stderr: stderr_tail(&out.stderr),
            });
        }
        Ok(())
    }

    /// Convert `video` to `audio`, then delete `video`. The video is kept if conversion fails.
    pub fn convert_and_remove(&self, video: &Path, audio: &Path) -> Result<(), ConvertError> {
        self.convert(video, audio)?;
        fs::remove_file(video).map_err(|source| ConvertError::Cleanup {
            path: video.to_path_buf(),
            source,
        })
    }
}

fn stderr_tail(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let text = text.trim();
    if text.len() <= STDERR_TAIL {
        return text.to_string();
    }
    let mut start = text.len() - STDERR_TAIL;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &text[start..])
}
