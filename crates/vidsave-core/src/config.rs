use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// HTTP transfer parameters (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Abort the transfer if it stays below this many bytes/sec...
    pub low_speed_limit_bytes: u32,
    /// ...for this many seconds.
    pub low_speed_time_secs: u64,
    /// Optional `User-Agent` header; libcurl sends none by default.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            user_agent: None,
        }
    }
}

/// Global configuration loaded from `~/.config/vidsave/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VidsaveConfig {
    /// Text file with one video URL per line.
    pub playlist_path: PathBuf,
    /// Directory the category folders are created under.
    pub output_root: PathBuf,
    /// Converter program, invoked as `<converter> -y -i <video> <audio>`.
    pub converter: String,
    /// Optional external player, invoked as `<player> <url>` for the current entry.
    #[serde(default)]
    pub player: Option<String>,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for VidsaveConfig {
    fn default() -> Self {
        Self {
            playlist_path: PathBuf::from("urls_list.txt"),
            output_root: PathBuf::from("."),
            converter: "ffmpeg".to_string(),
            player: None,
            http: HttpConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vidsave")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VidsaveConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VidsaveConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: VidsaveConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
