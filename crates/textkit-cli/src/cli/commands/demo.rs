//! Demo command: run all three utilities in sequence.

use anyhow::Result;
use std::io;
use std::path::PathBuf;
use textkit_core::cipher::CipherKey;
use textkit_core::config::TextkitConfig;
use textkit_core::demo::{self, DemoConfig};

/// Per-run overrides of the config.
#[derive(Debug, Default)]
pub struct DemoArgs {
    pub skip_tags: bool,
    pub url: Option<String>,
    pub key: Option<char>,
    pub dir: Option<PathBuf>,
}

pub fn run_demo(cfg: &TextkitConfig, args: DemoArgs) -> Result<()> {
    let mut demo_cfg = DemoConfig::from(cfg);
    demo_cfg.skip_tags = args.skip_tags;
    if let Some(url) = args.url {
        demo_cfg.url = url;
    }
    if let Some(key) = args.key {
        demo_cfg.key = CipherKey::from_char(key);
    }
    if let Some(dir) = args.dir {
        demo_cfg = demo_cfg.in_dir(&dir);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = demo::run_demo(&demo_cfg, &mut out)?;
    tracing::info!(
        round_trip_ok = report.round_trip_ok,
        tags = report.tags.as_ref().map(|t| t.len()).unwrap_or(0),
        "demo finished"
    );
    Ok(())
}
