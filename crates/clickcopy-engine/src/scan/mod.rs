//! # Span Scanner
//!
//! Line-scoped recognition of click-to-copy spans. [`scan`] walks a single line
//! left to right, asking the grammar for a candidate at each char boundary:
//!
//! - an accepted candidate becomes a [`SpanMatch`] and scanning resumes after it
//! - anything else advances one char
//!
//! The returned [`Spans`] iterator is lazy and `Clone`, so a scan can be
//! restarted or repeated and always yields the same matches.
//!
//! Generic inline code (plain backtick runs, fence aware) is scanned
//! separately by [`inline_code`].

pub mod fence;
pub mod inline_code;

use clickcopy_config::Settings;
use serde::Serialize;

use crate::grammar::{self, Candidate, Delimiters};
use crate::span::Span;

/// A recognized span, with every derived flag and text resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanMatch {
    /// Whole match, delimiters included.
    pub full: Span,
    pub open: Span,
    pub inner: Span,
    pub close: Span,
    /// Content between the innermost delimiters.
    pub inner_text: String,
    pub is_password: bool,
    pub clear_clipboard: bool,
    pub is_code_styled: bool,
    /// Text to show; a mask when `is_password`.
    pub display_text: String,
    /// Text placed on the clipboard.
    pub copy_text: String,
    /// The content itself is wrapped in backticks (as opposed to the tokens
    /// being backticks).
    #[serde(skip)]
    code_ticks: bool,
}

/// How a sub-range of a match is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegionKind {
    /// Delimiter text kept visible with markdown styling.
    Delimiter,
    /// The click-to-copy widget.
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub span: Span,
    pub kind: RegionKind,
}

impl SpanMatch {
    fn from_candidate(text: &str, c: Candidate, delims: &Delimiters<'_>) -> Option<Self> {
        if !c.is_accepted() {
            return None;
        }
        let inner_text = c.inner.slice(text)?.to_string();
        let code_ticks = grammar::has_code_ticks(&inner_text);
        let is_password = c.is_password(delims);
        let copy_text = grammar::strip_code_ticks(&inner_text).to_string();
        let display_text = if is_password {
            grammar::mask(&copy_text)
        } else {
            copy_text.clone()
        };

        Some(Self {
            full: c.full,
            open: c.open,
            inner: c.inner,
            close: c.close,
            is_password,
            clear_clipboard: c.clear_clipboard(delims),
            is_code_styled: code_ticks || delims.is_backtick_pair(),
            display_text,
            copy_text,
            inner_text,
            code_ticks,
        })
    }

    /// Moves every span by `base` bytes.
    #[must_use]
    pub fn shifted(mut self, base: usize) -> Self {
        self.full = self.full.shifted(base);
        self.open = self.open.shifted(base);
        self.inner = self.inner.shifted(base);
        self.close = self.close.shifted(base);
        self
    }

    /// Splits the match into rendered regions.
    ///
    /// With `hide_markdown` the whole match is one interactive region.
    /// Otherwise the delimiter runs stay visible around the interactive
    /// content; backticks wrapping the content count as delimiters.
    pub fn regions(&self, hide_markdown: bool) -> Vec<Region> {
        if hide_markdown {
            return vec![Region {
                span: self.full,
                kind: RegionKind::Interactive,
            }];
        }

        let tick = usize::from(self.code_ticks);
        let content = Span::new(self.inner.start + tick, self.inner.end - tick);
        vec![
            Region {
                span: Span::new(self.full.start, content.start),
                kind: RegionKind::Delimiter,
            },
            Region {
                span: content,
                kind: RegionKind::Interactive,
            },
            Region {
                span: Span::new(content.end, self.full.end),
                kind: RegionKind::Delimiter,
            },
        ]
    }
}

/// Lazily yields the [`SpanMatch`]es of one line.
#[derive(Debug, Clone)]
pub struct Spans<'a> {
    text: &'a str,
    delims: Delimiters<'a>,
    pos: usize,
}

impl Iterator for Spans<'_> {
    type Item = SpanMatch;

    fn next(&mut self) -> Option<SpanMatch> {
        while self.pos < self.text.len() {
            let at = self.pos;
            if let Some(m) = match_span_at(self.text, at, &self.delims) {
                self.pos = m.full.end;
                return Some(m);
            }
            self.pos += self.text[at..].chars().next().map_or(1, char::len_utf8);
        }
        None
    }
}

/// The accepted match anchored at byte `pos` of `text`, if any.
///
/// This is the single entry point both rendering surfaces go through.
pub fn match_span_at(text: &str, pos: usize, delims: &Delimiters<'_>) -> Option<SpanMatch> {
    grammar::match_at(text, pos, delims).and_then(|c| SpanMatch::from_candidate(text, c, delims))
}

/// Scans a single line with the token pair from `settings`.
///
/// Offsets are relative to the start of `line`. A line break inside `line`
/// bounds matches the same way the end of the line does.
pub fn scan<'a>(line: &'a str, settings: &'a Settings) -> Spans<'a> {
    scan_with(line, Delimiters::from_settings(settings))
}

pub fn scan_with<'a>(line: &'a str, delims: Delimiters<'a>) -> Spans<'a> {
    Spans {
        text: line,
        delims,
        pos: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn settings(start: &str, end: &str) -> Settings {
        Settings {
            start_token: start.to_string(),
            end_token: end.to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn end_to_end_default_tokens() {
        let s = Settings::default();
        let matches: Vec<_> = scan("Use [[npm install]] to set up.", &s).collect();

        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.full, Span::new(4, 19));
        assert_eq!(m.inner_text, "npm install");
        assert_eq!(m.display_text, "npm install");
        assert_eq!(m.copy_text, "npm install");
        assert!(!m.is_password);
        assert!(!m.clear_clipboard);
        assert!(!m.is_code_styled);
    }

    #[test]
    fn hidden_markdown_is_one_region() {
        let s = Settings::default();
        let m = scan("Use [[npm install]] to set up.", &s).next().unwrap();

        assert_eq!(
            m.regions(true),
            vec![Region {
                span: Span::new(4, 19),
                kind: RegionKind::Interactive
            }]
        );
    }

    #[test]
    fn visible_markdown_is_three_regions() {
        let s = Settings::default();
        let line = "Use [[npm install]] to set up.";
        let m = scan(line, &s).next().unwrap();
        let regions = m.regions(false);

        let pieces: Vec<_> = regions
            .iter()
            .map(|r| (r.span.slice(line).unwrap(), r.kind))
            .collect();
        assert_eq!(
            pieces,
            vec![
                ("[[", RegionKind::Delimiter),
                ("npm install", RegionKind::Interactive),
                ("]]", RegionKind::Delimiter),
            ]
        );
    }

    #[test]
    fn visible_markdown_treats_code_ticks_as_delimiters() {
        let s = Settings::default();
        let line = "[[`ls -la`]]";
        let m = scan(line, &s).next().unwrap();

        let pieces: Vec<_> = m
            .regions(false)
            .iter()
            .map(|r| r.span.slice(line).unwrap())
            .collect();
        assert_eq!(pieces, vec!["[[`", "ls -la", "`]]"]);
    }

    #[test]
    fn doubled_start_is_password() {
        let s = Settings::default();
        let matches: Vec<_> = scan("[[[[secret]]", &s).collect();

        assert_eq!(matches.len(), 1);
        assert!(matches[0].is_password);
        assert_eq!(matches[0].inner_text, "secret");
        assert_eq!(matches[0].display_text, "••••••");
        assert_eq!(matches[0].copy_text, "secret");
    }

    #[test]
    fn doubled_end_clears_clipboard() {
        let s = Settings::default();
        let matches: Vec<_> = scan("[[x]]]]", &s).collect();

        assert_eq!(matches.len(), 1);
        assert!(matches[0].clear_clipboard);
        assert!(!matches[0].is_password);
    }

    #[test]
    fn inline_code_content_is_stripped() {
        let s = Settings::default();
        let m = scan("[[`code`]]", &s).next().unwrap();

        assert!(m.is_code_styled);
        assert_eq!(m.display_text, "code");
        assert_eq!(m.copy_text, "code");
        assert_eq!(m.inner_text, "`code`");
    }

    #[test]
    fn password_code_span_masks_stripped_text() {
        let s = Settings::default();
        let m = scan("[[[[`hunter2`]]", &s).next().unwrap();

        assert!(m.is_password);
        assert!(m.is_code_styled);
        assert_eq!(m.display_text, "•••••••");
        assert_eq!(m.copy_text, "hunter2");
    }

    #[test]
    fn bare_tick_pair_content_is_literal() {
        let s = Settings {
            hide_markdown: false,
            ..Settings::default()
        };
        let line = "[[``]]";
        let m = scan(line, &s).next().unwrap();

        assert!(!m.is_code_styled);
        assert_eq!(m.copy_text, "``");
        let pieces: Vec<_> = m
            .regions(false)
            .iter()
            .map(|r| r.span.slice(line).unwrap())
            .collect();
        assert_eq!(pieces, vec!["[[", "``", "]]"]);
    }

    #[test]
    fn empty_backtick_pair_yields_nothing() {
        let s = settings("`", "`");
        assert_eq!(scan("``", &s).count(), 0);
    }

    #[test]
    fn backtick_tokens_are_code_styled() {
        let s = settings("`", "`");
        let matches: Vec<_> = scan("run `make` then `make install`", &s).collect();

        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.is_code_styled));
        assert_eq!(matches[0].copy_text, "make");
        assert_eq!(matches[1].copy_text, "make install");
    }

    #[test]
    fn multiple_matches_are_ordered_and_disjoint() {
        let s = Settings::default();
        let matches: Vec<_> = scan("[[a]] and [[b]] and [[c]]", &s).collect();

        let texts: Vec<_> = matches.iter().map(|m| m.inner_text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        for pair in matches.windows(2) {
            assert!(pair[0].full.end <= pair[1].full.start);
        }
    }

    #[test]
    fn rejected_empty_span_does_not_hide_later_span() {
        let s = Settings::default();
        let matches: Vec<_> = scan("[[]] then [[ok]]", &s).collect();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].inner_text, "ok");
    }

    #[test]
    fn rejection_advances_one_char() {
        // The empty candidate at 0 is skipped, the span starting at 1 wins.
        let s = Settings::default();
        let matches: Vec<_> = scan("[[[[]]]]", &s).collect();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].full, Span::new(1, 8));
        assert_eq!(matches[0].inner_text, "[");
        assert!(matches[0].clear_clipboard);
    }

    #[rstest]
    #[case::unclosed("[[never closed")]
    #[case::closer_only("just ]] here")]
    #[case::split_across_lines("[[first\nsecond]]")]
    #[case::empty("")]
    fn no_matches(#[case] line: &str) {
        let s = Settings::default();
        assert_eq!(scan(line, &s).count(), 0);
    }

    #[test]
    fn scan_is_restartable() {
        let s = Settings::default();
        let spans = scan("[[a]] [[[[b]]]]", &s);

        let first: Vec<_> = spans.clone().collect();
        let second: Vec<_> = spans.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn shifted_moves_all_spans() {
        let s = Settings::default();
        let m = scan("[[a]]", &s).next().unwrap().shifted(100);

        assert_eq!(m.full, Span::new(100, 105));
        assert_eq!(m.open, Span::new(100, 102));
        assert_eq!(m.inner, Span::new(102, 103));
        assert_eq!(m.close, Span::new(103, 105));
    }

    #[test]
    fn custom_multichar_tokens() {
        let s = settings("{{copy:", "}}");
        let m = scan("see {{copy:ssh host}} now", &s).next().unwrap();
        assert_eq!(m.copy_text, "ssh host");
    }
}
