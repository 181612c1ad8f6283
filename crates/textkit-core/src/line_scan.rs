//! Max-word line scanner.
//!
//! Streams a text source line by line and keeps the first line with the highest
//! whitespace-delimited word count. Only the current best line is held in memory.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Best line seen by a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaxWordLine {
    /// The line as read, without its terminator and without trimming.
    pub line: String,
    /// Word count of `line`.
    pub words: usize,
    /// 1-based position of `line` in the source; 0 if no line had words.
    pub line_number: usize,
    /// Total number of lines read.
    pub lines_scanned: usize,
}

/// Word separators: ASCII space, tab, LF, VT, FF, CR.
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Number of whitespace-delimited words in `line`.
///
/// The line is trimmed of every character up to U+0020 (control characters included),
/// then split on runs of ASCII whitespace. Non-ASCII spaces such as U+00A0 do not
/// separate words. Blank and whitespace-only lines have zero words.
pub fn word_count(line: &str) -> usize {
    line.trim_matches(|c: char| c <= ' ')
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .count()
}

/// Iterator over the lines of a `BufRead`, ending a line at `\n`, `\r`, or `\r\n`.
///
/// Terminators are not included. A final line without a terminator is still yielded.
pub struct Lines<R> {
    reader: R,
    /// Last line ended at `\r`; a `\n` right after it belongs to the same terminator.
    skip_lf: bool,
}

/// Split `reader` into lines on any of `\n`, `\r`, `\r\n`.
pub fn lines<R: BufRead>(reader: R) -> Lines<R> {
    Lines {
        reader,
        skip_lf: false,
    }
}

impl<R: BufRead> Lines<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        let mut partial = false;
        loop {
            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }
            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(pos) => {
                    bytes.extend_from_slice(&available[..pos]);
                    self.skip_lf = available[pos] == b'\r';
                    self.reader.consume(pos + 1);
                    return into_line(bytes).map(Some);
                }
                None => {
                    let n = available.len();
                    bytes.extend_from_slice(available);
                    self.reader.consume(n);
                    partial = true;
                }
            }
        }
        if partial {
            into_line(bytes).map(Some)
        } else {
            Ok(None)
        }
    }
}

fn into_line(bytes: Vec<u8>) -> io::Result<String> {
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Scan `reader` and return the first line with the most words.
///
/// A line replaces the current best only when its count is strictly greater, so ties
/// keep the earliest line. An empty source yields an empty line with zero words.
pub fn find_max_word_line<R: BufRead>(reader: R) -> io::Result<MaxWordLine> {
    let mut best = MaxWordLine::default();
    for (idx, line) in lines(reader).enumerate() {
        let line = line?;
        best.lines_scanned = idx + 1;
        let words = word_count(&line);
        if words > best.words {
            best.words = words;
            best.line_number = idx + 1;
            best.line = line;
        }
    }
    Ok(best)
}

/// Open `path` as UTF-8 text and return the line with the most words.
pub fn find_max_word_line_path(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let best = find_max_word_line(BufReader::new(file))
        .with_context(|| format!("read {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        lines = best.lines_scanned,
        words = best.words,
        line_number = best.line_number,
        "max-word line scan finished"
    );
    Ok(best.line)
}
