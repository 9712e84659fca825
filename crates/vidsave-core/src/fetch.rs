//! Streaming HTTP GET into a local file.
//!
//! One libcurl easy handle per transfer; each received chunk is written
//! straight to the destination file, so memory use stays flat regardless of
//! video size.

use crate::config::HttpConfig;
use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, timeout, aborted transfer, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Creating or writing the destination file failed.
    #[error("write {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Transfer knobs, usually built from `[http]` in config.toml.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    pub user_agent: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&HttpConfig::default())
    }
}

impl From<&HttpConfig> for FetchOptions {
    fn from(cfg: &HttpConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            low_speed_limit: cfg.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(cfg.low_speed_time_secs),
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// GET `url` and stream the body into `dest` (created or truncated).
/// Returns the number of bytes written.
///
/// `dest` is only created once the server starts sending a successful body, so
/// a refused connection or an error status leaves nothing behind. A transfer
/// that breaks mid-body keeps what was received.
///
/// Blocks the calling thread for the whole transfer.
pub fn fetch_to_file(url: &str, dest: &Path, opts: &FetchOptions) -> Result<u64, FetchError> {
    let file: RefCell<Option<File>> = RefCell::new(None);
    let written = RefCell::new(0u64);
    let write_err: RefCell<Option<io::Error>> = RefCell::new(None);

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    // Abort on >= 400 before any error page reaches the file.
    easy.fail_on_error(true)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.low_speed_limit(opts.low_speed_limit)?;
    easy.low_speed_time(opts.low_speed_time)?;
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            let mut slot = file.borrow_mut();
            let res = match slot.as_mut() {
                Some(f) => f.write_all(data),
                None => File::create(dest).and_then(|mut f| {
                    let r = f.write_all(data);
                    *slot = Some(f);
                    r
                }),
            };
            match res {
                Ok(()) => {
                    *written.borrow_mut() += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    tracing::warn!(dest = %dest.display(), "write failed: {}", e);
                    *write_err.borrow_mut() = Some(e);
                    Ok(0) // abort transfer
                }
            }
        })?;
        transfer.perform()
    };

    let storage_err = |source| FetchError::Storage {
        path: dest.to_path_buf(),
        source,
    };

    if let Some(source) = write_err.into_inner() {
        return Err(storage_err(source));
    }

    let code = easy.response_code()?;
    if let Err(e) = performed {
        if code >= 400 {
            return Err(FetchError::Http(code));
        }
        return Err(FetchError::Curl(e));
    }
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    match file.into_inner() {
        Some(mut f) => f.flush().map_err(storage_err)?,
        // 2xx with an empty body still produces the (empty) file.
        None => {
            File::create(dest).map_err(storage_err)?;
        }
    }
    Ok(written.into_inner())
}
