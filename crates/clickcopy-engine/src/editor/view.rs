use std::ops::Range;

use xi_rope::{Delta, Rope, RopeInfo};

use super::DecorateError;
use crate::span::Span;

/// One document line as seen by the decorator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInfo {
    /// 1-based line number.
    pub number: usize,
    /// Offset of the first char of the line.
    pub from: usize,
    /// Offset just past the last char, excluding the terminator.
    pub to: usize,
    pub text: String,
}

/// What the decorator needs from a live editor view.
///
/// Offsets are byte offsets into the document.
pub trait EditorView {
    fn doc_len(&self) -> usize;

    /// The ranges currently on screen, in document order.
    fn visible_ranges(&self) -> Vec<Span>;

    /// Head of the main selection.
    fn cursor(&self) -> usize;

    fn line_at(&self, offset: usize) -> Result<LineInfo, DecorateError>;

    fn line(&self, number: usize) -> Result<LineInfo, DecorateError>;

    fn slice(&self, span: Span) -> Result<String, DecorateError>;
}

/// An [`EditorView`] over an `xi_rope::Rope` with a selection and viewport.
#[derive(Debug, Clone)]
pub struct RopeView {
    buffer: Rope,
    selection: Range<usize>,
    /// `None` means the whole document is visible.
    viewport: Option<Span>,
}

impl RopeView {
    pub fn new(text: &str) -> Self {
        let buffer = Rope::from(text);
        let len = buffer.len();
        Self {
            buffer,
            selection: len..len,
            viewport: None,
        }
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.buffer
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn set_selection(&mut self, selection: Range<usize>) {
        self.selection = selection;
    }

    pub fn set_cursor(&mut self, at: usize) {
        self.selection = at..at;
    }

    pub fn set_viewport(&mut self, viewport: Option<Span>) {
        self.viewport = viewport;
    }

    /// Applies an edit, placing the cursor at the end of the inserted text.
    pub fn apply(&mut self, delta: &Delta<RopeInfo>) {
        let (iv, new_len) = delta.summary();
        self.buffer = delta.apply(&self.buffer);
        let at = iv.start() + new_len;
        self.selection = at..at;
    }

    fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.buffer.len()) + 1
    }
}

impl EditorView for RopeView {
    fn doc_len(&self) -> usize {
        self.buffer.len()
    }

    fn visible_ranges(&self) -> Vec<Span> {
        let full = Span::new(0, self.buffer.len());
        match self.viewport {
            Some(vp) => vec![Span::new(vp.start.min(full.end), vp.end.min(full.end))],
            None => vec![full],
        }
    }

    fn cursor(&self) -> usize {
        self.selection.end
    }

    fn line_at(&self, offset: usize) -> Result<LineInfo, DecorateError> {
        if offset > self.buffer.len() {
            return Err(DecorateError::OffsetOutOfRange {
                offset,
                len: self.buffer.len(),
            });
        }
        self.line(self.buffer.line_of_offset(offset) + 1)
    }

    fn line(&self, number: usize) -> Result<LineInfo, DecorateError> {
        let count = self.line_count();
        if number == 0 || number > count {
            return Err(DecorateError::LineOutOfRange { number, count });
        }
        let from = self.buffer.offset_of_line(number - 1);
        let next = if number == count {
            self.buffer.len()
        } else {
            self.buffer.offset_of_line(number)
        };
        let raw = self.buffer.slice_to_cow(from..next);
        let text = raw.trim_end_matches(['\n', '\r']).to_string();
        Ok(LineInfo {
            number,
            from,
            to: from + text.len(),
            text,
        })
    }

    fn slice(&self, span: Span) -> Result<String, DecorateError> {
        if span.start > span.end || span.end > self.buffer.len() {
            return Err(DecorateError::OffsetOutOfRange {
                offset: span.end,
                len: self.buffer.len(),
            });
        }
        Ok(self.buffer.slice_to_cow(span.start..span.end).into_owned())
    }
}
