//! Tags command: count HTML tags from a URL or a local file.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use textkit_core::fetch::FetchOptions;
use textkit_core::tags;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSource {
    Url(String),
    File(PathBuf),
}

pub fn run_tags(source: &TagSource, opts: &FetchOptions) -> Result<()> {
    let counts = match source {
        TagSource::Url(url) => tags::count_tags_at_url(url, opts)?,
        TagSource::File(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            tags::count_tags(&text)
        }
    };
    let stdout = io::stdout();
    tags::write_report(&counts, &mut stdout.lock())?;
    Ok(())
}
