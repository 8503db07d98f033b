use xi_rope::Rope;

use crate::span::Span;

/// A single line of a rope with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// 1-based line number.
    pub number: usize,
    /// Span of the line content, excluding the line terminator.
    pub span: Span,
    /// Span including the terminator (`\n` or `\r\n`) when present.
    pub raw: Span,
    pub text: String,
}

/// Iterates over the lines of `rope`, tracking byte spans.
///
/// Uses `lines_raw` so terminators are accounted for in the spans even though
/// they are trimmed from `text`.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).enumerate().map(move |(idx, line)| {
        let start = offset;
        let raw_len = line.len();
        offset += raw_len;
        let text = line.trim_end_matches(['\n', '\r']).to_string();
        LineRef {
            number: idx + 1,
            span: Span::new(start, start + text.len()),
            raw: Span::new(start, offset),
            text,
        }
    })
}

/// Extracts the text for a span as an owned String, clamping to the rope.
pub fn slice_to_string(rope: &Rope, sp: Span) -> String {
    let len = rope.len();
    let start = sp.start.min(len);
    let end = sp.end.min(len).max(start);
    rope.slice_to_cow(start..end).into_owned()
}
