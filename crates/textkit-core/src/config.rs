use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::FetchOptions;

/// Page fetched by the demo when no URL is configured.
pub const DEFAULT_URL: &str = "https://httpbin.org/html";

/// HTTP fetch parameters (optional `[fetch]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole request, body included.
    pub timeout_secs: u64,
    /// Redirects followed before giving up.
    pub max_redirections: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
            max_redirections: 10,
        }
    }
}

impl From<&FetchConfig> for FetchOptions {
    fn from(cfg: &FetchConfig) -> Self {
        FetchOptions {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            max_redirections: cfg.max_redirections,
        }
    }
}

/// Global configuration loaded from `~/.config/textkit/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextkitConfig {
    /// Plaintext file written and scanned by the demo.
    pub input_path: PathBuf,
    /// Cipher output of the demo.
    pub encrypted_path: PathBuf,
    /// Deciphered copy of the encrypted file.
    pub decrypted_path: PathBuf,
    /// Cipher key; its code point modulo 65536 is the shift.
    pub cipher_key: char,
    /// Page whose tags the demo counts.
    pub url: String,
    /// Optional fetch tuning; if missing, built-in defaults are used.
    #[serde(default)]
    pub fetch: Option<FetchConfig>,
}

impl Default for TextkitConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("input.txt"),
            encrypted_path: PathBuf::from("encrypted.txt"),
            decrypted_path: PathBuf::from("decrypted.txt"),
            cipher_key: 'K',
            url: DEFAULT_URL.to_string(),
            fetch: None,
        }
    }
}

impl TextkitConfig {
    /// Fetch options from the `[fetch]` section, or defaults.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::from(&self.fetch.clone().unwrap_or_default())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("textkit")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TextkitConfig> {
    load_or_init_at(&config_path()?)
}

/// Like `load_or_init` but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<TextkitConfig> {
    if !path.exists() {
        let default_cfg = TextkitConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: TextkitConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
