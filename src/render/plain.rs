//! Plain-text diagnostic rendering with source snippets and word wrapping.

use tracing::warn;
use unicode_width::UnicodeWidthStr;

use super::{RenderDiagnostic, Sources};
use crate::suite::{Diagnostic, SourceRange};

// === Constants ===

/// Column width diagnostics are wrapped to inside report bodies.
pub const DEFAULT_WRAP_WIDTH: usize = 80;

// === Core Types ===

/// Renders diagnostics as uncoloured text suitable for embedding in files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainRenderer {
    width: usize,
}

impl PlainRenderer {
    /// A `width` of 0 or 1 disables wrapping.
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl Default for PlainRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WRAP_WIDTH)
    }
}

impl RenderDiagnostic for PlainRenderer {
    fn render(&self, diagnostic: &Diagnostic, sources: &Sources) -> String {
        let mut buf = String::from("\n");
        buf.push_str(&format!(
            "{}: {}\n",
            diagnostic.severity.label(),
            diagnostic.summary
        ));

        if let Some(subject) = &diagnostic.subject {
            buf.push('\n');
            buf.push_str(&format!(
                "  on {} line {}:\n",
                subject.filename, subject.start.line
            ));
            match sources.get(&subject.filename) {
                Some(src) => {
                    for (line_num, line) in snippet_lines(src, subject) {
                        buf.push_str(&format!("  {:>4}: {}\n", line_num, line));
                    }
                }
                None => warn!(
                    file = %subject.filename,
                    "no source available for diagnostic context"
                ),
            }
        }

        if !diagnostic.detail.is_empty() {
            buf.push('\n');
            for line in diagnostic.detail.split('\n') {
                if self.width > 1 && !line.starts_with(' ') {
                    buf.push_str(&wrap(line, self.width - 1));
                } else {
                    buf.push_str(line);
                }
                buf.push('\n');
            }
        }

        buf
    }
}

// === Helpers ===

/// Returns the numbered lines covered by `range`, or nothing if they fall
/// outside the source.
fn snippet_lines(src: &[u8], range: &SourceRange) -> Vec<(usize, String)> {
    let start = range.start.line;
    if start == 0 {
        return Vec::new();
    }
    let end = range.end.line.max(start);
    String::from_utf8_lossy(src)
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .skip(start - 1)
        .take(end - start + 1)
        .map(|(num, line)| (num, line.to_string()))
        .collect()
}

/// Greedy word wrap on spaces. Words wider than `limit` are left whole.
fn wrap(line: &str, limit: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut current = 0usize;
    for (i, word) in line.split(' ').enumerate() {
        let word_width = word.width();
        if i == 0 {
            out.push_str(word);
            current = word_width;
            continue;
        }
        if current > 0 && current + 1 + word_width > limit {
            out.push('\n');
            out.push_str(word);
            current = word_width;
        } else {
            out.push(' ');
            out.push_str(word);
            current += 1 + word_width;
        }
    }
    out
}
