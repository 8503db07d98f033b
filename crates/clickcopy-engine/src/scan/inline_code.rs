//! Fence-aware scanning for generic inline code (`` `like this` ``).
//!
//! Unlike the span scanner this works on a whole block of text. Fence state
//! is carried line to line in a [`ScanState`] that lives for one call only.

use serde::Serialize;

use super::fence::{CodeFence, FenceSig};
use crate::span::Span;

const TICK: u8 = b'`';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineCodeMatch {
    /// Span including both backtick runs.
    pub full: Span,
    /// Content between the runs.
    pub inner: Span,
    /// Length of the backtick runs.
    pub ticks: usize,
    pub display_text: String,
    /// Content with one wrapping space pair removed.
    pub copy_text: String,
}

/// Per-pass state threaded through the line walk.
#[derive(Debug, Clone, Default)]
struct ScanState {
    /// The fence we are inside of, if any.
    fence: Option<FenceSig>,
    /// Offset before which nothing may open a new code span (the tail of a
    /// rejected multi-line span).
    resume_at: usize,
}

impl ScanState {
    fn observe_line(&mut self, text: &str, line: Span, out: &mut Vec<InlineCodeMatch>) {
        let raw = &text[line.start..line.end];
        if let Some(open) = self.fence {
            if CodeFence::closes(open, raw) {
                self.fence = None;
            }
            return;
        }
        if let Some(sig) = CodeFence::sig(raw) {
            self.fence = Some(sig);
            return;
        }

        let bytes = text.as_bytes();
        let body_end = line.start + raw.trim_end_matches(['\r', '\n']).len();
        let mut i = line.start.max(self.resume_at);
        while i < body_end {
            if bytes[i] != TICK {
                i += 1;
                continue;
            }
            let open_start = i;
            let ticks = run_len(bytes, i);
            i += ticks;

            match find_closer(text, i, ticks) {
                Some(Closer {
                    start,
                    crossed_line: false,
                }) => {
                    let inner = Span::new(open_start + ticks, start);
                    let content = &text[inner.start..inner.end];
                    out.push(InlineCodeMatch {
                        full: Span::new(open_start, start + ticks),
                        inner,
                        ticks,
                        display_text: content.to_string(),
                        copy_text: normalize_code(content).to_string(),
                    });
                    i = start + ticks;
                }
                Some(Closer { start, .. }) => {
                    // Multi-line code span: consumed, never decorated.
                    self.resume_at = start + ticks;
                    return;
                }
                None => {}
            }
        }
    }
}

struct Closer {
    start: usize,
    crossed_line: bool,
}

fn run_len(bytes: &[u8], at: usize) -> usize {
    bytes[at..].iter().take_while(|&&b| b == TICK).count()
}

/// Finds the next backtick run of exactly `ticks` length from `from`.
///
/// The search stops at a blank line or a fence delimiter line, which end the
/// paragraph the opener belongs to.
fn find_closer(text: &str, from: usize, ticks: usize) -> Option<Closer> {
    let bytes = text.as_bytes();
    let mut i = from;
    let mut crossed_line = false;
    while i < bytes.len() {
        match bytes[i] {
            TICK => {
                let len = run_len(bytes, i);
                if len == ticks {
                    return Some(Closer {
                        start: i,
                        crossed_line,
                    });
                }
                i += len;
            }
            b'\n' => {
                crossed_line = true;
                i += 1;
                let next = text[i..].split_inclusive('\n').next().unwrap_or("");
                if next.trim().is_empty() || CodeFence::sig(next).is_some() {
                    return None;
                }
            }
            _ => i += 1,
        }
    }
    None
}

/// Strips one leading and one trailing space when both are present and the
/// content is not all spaces, as markdown does for code spans.
pub fn normalize_code(content: &str) -> &str {
    let all_spaces = content.chars().all(|c| c == ' ');
    if content.len() >= 2 && content.starts_with(' ') && content.ends_with(' ') && !all_spaces
    {
        &content[1..content.len() - 1]
    } else {
        content
    }
}

/// Scans `text` for inline code spans outside fenced code blocks.
///
/// Offsets are relative to `text`. Spans whose content would cross a line
/// break are never reported.
pub fn scan_inline_code(text: &str) -> Vec<InlineCodeMatch> {
    let mut state = ScanState::default();
    let mut out = vec![];
    let mut offset = 0;
    for raw in text.split_inclusive('\n') {
        let line = Span::new(offset, offset + raw.len());
        offset = line.end;
        state.observe_line(text, line, &mut out);
    }
    out
}
