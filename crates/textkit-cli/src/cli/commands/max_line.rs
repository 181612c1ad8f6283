//! Max-line command: print the line with the most words.

use anyhow::Result;
use std::path::Path;
use textkit_core::line_scan;

pub fn run_max_line(path: &Path) -> Result<()> {
    let line = line_scan::find_max_word_line_path(path)?;
    println!("{}", line);
    Ok(())
}
