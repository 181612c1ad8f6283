//! HTML tag frequency counting.
//!
//! Tags are found with a lexical pattern over the lowercased payload, not an HTML
//! parse: `<`, optional ASCII whitespace, a `[a-z0-9]+` name, then anything up to `>`.
//! Closing tags (`</p>`) never match because `/` cannot start a name.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::fetch::{fetch_text, FetchOptions};

static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(?-u:\s)*([a-z0-9]+)[^>]*>").expect("tag pattern is valid"));

/// Tag name -> occurrence count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCounts {
    counts: BTreeMap<String, u64>,
}

impl TagCounts {
    pub fn get(&self, tag: &str) -> u64 {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of pattern matches.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries by tag name ascending.
    pub fn by_name(&self) -> Vec<(&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect()
    }

    /// Entries by count ascending; equal counts keep tag name order.
    pub fn by_frequency(&self) -> Vec<(&str, u64)> {
        let mut entries = self.by_name();
        entries.sort_by_key(|&(_, count)| count);
        entries
    }

    fn record(&mut self, tag: &str) {
        *self.counts.entry(tag.to_string()).or_insert(0) += 1;
    }
}

/// Count tag occurrences in `text`.
pub fn count_tags(text: &str) -> TagCounts {
    let lowered = text.to_lowercase();
    let mut counts = TagCounts::default();
    for caps in TAG_REGEX.captures_iter(&lowered) {
        counts.record(&caps[1]);
    }
    counts
}

/// Fetch `url` and count its tags.
pub fn count_tags_at_url(url: &str, opts: &FetchOptions) -> Result<TagCounts> {
    let body = fetch_text(url, opts)?;
    let counts = count_tags(&body);
    tracing::info!(
        url,
        bytes = body.len(),
        distinct = counts.len(),
        total = counts.total(),
        "counted tags"
    );
    Ok(counts)
}

/// Print both views as `name: count` lines under their headers.
pub fn write_report<W: Write>(counts: &TagCounts, out: &mut W) -> io::Result<()> {
    writeln!(out, "--- Tags in lexicographic order ---")?;
    for (tag, count) in counts.by_name() {
        writeln!(out, "{}: {}", tag, count)?;
    }
    writeln!(out)?;
    writeln!(out, "--- Tags by frequency (ascending) ---")?;
    for (tag, count) in counts.by_frequency() {
        writeln!(out, "{}: {}", tag, count)?;
    }
    Ok(())
}
