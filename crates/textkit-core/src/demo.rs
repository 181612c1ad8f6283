//! Demonstration driver: runs the three utilities in sequence.
//!
//! Every path, the key, and the URL come from [`DemoConfig`]; nothing here is global.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::cipher::{self, CipherKey};
use crate::config::TextkitConfig;
use crate::fetch::FetchOptions;
use crate::line_scan;
use crate::tags::{self, TagCounts};

/// Text written to the input file before the scan.
pub const SAMPLE_TEXT: &str = "Перший рядок\n\
    Другий рядок з кількома словами в ньому\n\
    Один\n\
    Цей рядок має найбільше слів тут є п'ять слів";

/// Inputs for [`run_demo`].
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub input_path: PathBuf,
    pub encrypted_path: PathBuf,
    pub decrypted_path: PathBuf,
    pub key: CipherKey,
    pub url: String,
    pub fetch: FetchOptions,
    pub sample_text: String,
    /// Skip the network step.
    pub skip_tags: bool,
}

impl From<&TextkitConfig> for DemoConfig {
    fn from(cfg: &TextkitConfig) -> Self {
        Self {
            input_path: cfg.input_path.clone(),
            encrypted_path: cfg.encrypted_path.clone(),
            decrypted_path: cfg.decrypted_path.clone(),
            key: CipherKey::from_char(cfg.cipher_key),
            url: cfg.url.clone(),
            fetch: cfg.fetch_options(),
            sample_text: SAMPLE_TEXT.to_string(),
            skip_tags: false,
        }
    }
}

impl DemoConfig {
    /// Put the three files under `dir`, keeping their names.
    pub fn in_dir(mut self, dir: &std::path::Path) -> Self {
        for path in [
            &mut self.input_path,
            &mut self.encrypted_path,
            &mut self.decrypted_path,
        ] {
            *path = dir.join(&*path);
        }
        self
    }
}

/// What the demo observed.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub max_word_line: String,
    /// Decrypted text equals the original.
    pub round_trip_ok: bool,
    /// `None` when the tag step was skipped.
    pub tags: Option<TagCounts>,
}

/// Run all three utilities, printing results to `out`.
pub fn run_demo<W: Write>(cfg: &DemoConfig, out: &mut W) -> Result<DemoReport> {
    writeln!(out, "=== Task 1: line with the most words ===")?;
    fs::write(&cfg.input_path, &cfg.sample_text)
        .with_context(|| format!("write {}", cfg.input_path.display()))?;
    let max_word_line = line_scan::find_max_word_line_path(&cfg.input_path)?;
    writeln!(out, "Line with most words: {}", max_word_line)?;

    writeln!(out)?;
    writeln!(out, "=== Task 2: Caesar encrypt/decrypt ===")?;
    cipher::encrypt_file(&cfg.input_path, &cfg.encrypted_path, cfg.key)?;
    cipher::decrypt_file(&cfg.encrypted_path, &cfg.decrypted_path, cfg.key)?;

    let original = fs::read_to_string(&cfg.input_path)
        .with_context(|| format!("read {}", cfg.input_path.display()))?;
    let encrypted = cipher::read_text_lossy(&cfg.encrypted_path)?;
    let decrypted = fs::read_to_string(&cfg.decrypted_path)
        .with_context(|| format!("read {}", cfg.decrypted_path.display()))?;
    writeln!(out, "Original:\n{}", original)?;
    writeln!(out, "Encrypted:\n{}", encrypted)?;
    writeln!(out, "Decrypted:\n{}", decrypted)?;
    let round_trip_ok = original == decrypted;
    if !round_trip_ok {
        tracing::warn!("decrypted text differs from original");
    }

    let tags = if cfg.skip_tags {
        tracing::debug!("tag counting skipped");
        None
    } else {
        writeln!(out)?;
        writeln!(out, "=== Task 3: HTML tag count ({}) ===", cfg.url)?;
        let counts = tags::count_tags_at_url(&cfg.url, &cfg.fetch)?;
        tags::write_report(&counts, out)?;
        Some(counts)
    };

    Ok(DemoReport {
        max_word_line,
        round_trip_ok,
        tags,
    })
}
