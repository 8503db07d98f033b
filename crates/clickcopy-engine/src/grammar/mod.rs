//! # Span Grammar
//!
//! The single definition of what a click-to-copy span looks like. Both the
//! editor line scanner ([`crate::scan`]) and the markdown rule
//! ([`crate::markdown`]) call [`match_at`]; neither re-implements the rules.
//!
//! ## Grammar
//!
//! ```text
//! span    := opener content closer
//! opener  := START START | START        (two repetitions preferred)
//! content := shortest run of chars, no line break, followed by END
//! closer  := END END | END              (two repetitions when present)
//! ```
//!
//! If a doubled opener finds no closer, the single opener is tried at the same
//! position. At most two repetitions are consumed on either side; any extra
//! delimiter characters stay in the content or start the next candidate.
//!
//! A candidate with empty content is *rejected*: it is reported by
//! [`match_at`] so callers can step past it, but never becomes a match.

pub mod cursor;

use clickcopy_config::Settings;

use crate::span::Span;
use cursor::Cursor;

pub const BACKTICK: &str = "`";

/// The configured start/end token pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters<'a> {
    pub start: &'a str,
    pub end: &'a str,
}

impl<'a> Delimiters<'a> {
    pub fn new(start: &'a str, end: &'a str) -> Self {
        Self { start, end }
    }

    /// The effective pair for `settings`, falling back to the defaults when a
    /// token is empty.
    pub fn from_settings(settings: &'a Settings) -> Self {
        let (start, end) = settings.effective_tokens();
        Self { start, end }
    }

    /// Both tokens are a single backtick, so every span is inline code.
    pub fn is_backtick_pair(&self) -> bool {
        self.start == BACKTICK && self.end == BACKTICK
    }
}

/// A delimited run found at a position, before validity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// The whole run, delimiters included.
    pub full: Span,
    /// One or two start tokens.
    pub open: Span,
    /// Content between the delimiters.
    pub inner: Span,
    /// One or two end tokens.
    pub close: Span,
}

impl Candidate {
    /// Spans with empty content never match on any surface.
    pub fn is_accepted(&self) -> bool {
        !self.inner.is_empty()
    }

    pub fn is_password(&self, delims: &Delimiters<'_>) -> bool {
        self.open.len() == delims.start.len() * 2
    }

    pub fn clear_clipboard(&self, delims: &Delimiters<'_>) -> bool {
        self.close.len() == delims.end.len() * 2
    }
}

/// Tries to match a span starting exactly at byte offset `pos` of `text`.
///
/// Returns `None` when no closer is reachable before a line break or the end of
/// `text`. Offsets in the returned [`Candidate`] are relative to `text`.
pub fn match_at(text: &str, pos: usize, delims: &Delimiters<'_>) -> Option<Candidate> {
    if delims.start.is_empty() || delims.end.is_empty() {
        return None;
    }

    'reps: for reps in [2, 1] {
        let mut cur = Cursor::at(text, pos);
        if !cur.eat_repeated(delims.start, reps) {
            continue;
        }
        let inner_start = cur.i;

        while !cur.starts_with(delims.end) {
            match cur.bump() {
                None | Some('\n') | Some('\r') => continue 'reps,
                Some(_) => {}
            }
        }
        let inner_end = cur.i;

        cur.eat(delims.end);
        cur.eat(delims.end);

        return Some(Candidate {
            full: Span::new(pos, cur.i),
            open: Span::new(pos, inner_start),
            inner: Span::new(inner_start, inner_end),
            close: Span::new(inner_end, cur.i),
        });
    }

    None
}

/// True when `content` is wrapped in a single pair of backticks, e.g. `` `ls` ``.
///
/// A bare ` `` ` has nothing inside the ticks and stays literal content.
pub fn has_code_ticks(content: &str) -> bool {
    content.len() > 2 && content.starts_with('`') && content.ends_with('`')
}

/// Strips one leading and one trailing backtick when [`has_code_ticks`] holds.
pub fn strip_code_ticks(content: &str) -> &str {
    if has_code_ticks(content) {
        &content[1..content.len() - 1]
    } else {
        content
    }
}

pub const MASK_CHAR: char = '•';

/// A mask with one placeholder per char of `text`.
pub fn mask(text: &str) -> String {
    std::iter::repeat_n(MASK_CHAR, text.chars().count()).collect()
}
