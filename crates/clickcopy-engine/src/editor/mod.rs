//! # Editor Decorator
//!
//! Turns span matches in the visible part of a live document into display
//! instructions. The document is never touched: a pass reads lines through
//! [`EditorView`] and produces a [`DecorationSet`] of marks and replacement
//! widgets.
//!
//! The line holding the cursor is left undecorated so it stays editable
//! character by character. A pass that fails is logged and yields no
//! decorations; the next view update gets a fresh attempt.

pub mod decoration;
pub mod toolbar;
pub mod view;
pub mod widget;

use clickcopy_config::Settings;
use thiserror::Error;

use crate::copy::Message;
use crate::scan::inline_code::scan_inline_code;
use crate::scan::{self, RegionKind};
use crate::span::Span;

pub use decoration::{Decoration, DecorationKind, DecorationSet, DecorationSetBuilder};
pub use view::{EditorView, LineInfo, RopeView};
pub use widget::CopyWidget;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecorateError {
    #[error("offset {offset} is outside the document (length {len})")]
    OffsetOutOfRange { offset: usize, len: usize },
    #[error("line {number} does not exist (document has {count} lines)")]
    LineOutOfRange { number: usize, count: usize },
    #[error("empty decoration range at {0:?}")]
    EmptyRange(Span),
    #[error("decoration {next:?} overlaps or precedes {previous:?}")]
    Unordered { previous: Span, next: Span },
}

/// What changed since the last pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    pub doc_changed: bool,
    pub viewport_changed: bool,
    pub selection_set: bool,
}

impl ViewUpdate {
    pub fn needs_redecorate(&self) -> bool {
        self.doc_changed || self.viewport_changed || self.selection_set
    }
}

/// Holds the decorations for one editor view across updates.
#[derive(Debug)]
pub struct Decorator {
    settings: Settings,
    decorations: DecorationSet,
}

impl Decorator {
    pub fn new(view: &dyn EditorView, settings: Settings) -> Self {
        let decorations = decorate_or_empty(view, &settings);
        Self {
            settings,
            decorations,
        }
    }

    /// Recomputes the decorations when the update calls for it. Returns
    /// whether a pass ran.
    pub fn update(&mut self, view: &dyn EditorView, update: ViewUpdate) -> bool {
        if !update.needs_redecorate() {
            return false;
        }
        self.decorations = decorate_or_empty(view, &self.settings);
        true
    }

    pub fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Primary activation of the widget at `at`.
    pub fn activate(&self, at: usize) -> Option<Message> {
        self.decorations
            .widget_at(at)
            .map(CopyWidget::activate_primary)
    }

    /// Secondary activation of the widget at `at`; reveals or re-masks a
    /// password in place.
    pub fn toggle_reveal(&mut self, at: usize) -> bool {
        self.decorations
            .widget_at_mut(at)
            .is_some_and(CopyWidget::activate_secondary)
    }
}

fn decorate_or_empty(view: &dyn EditorView, settings: &Settings) -> DecorationSet {
    match decorate(view, settings) {
        Ok(set) => {
            log::debug!("decorated {} ranges", set.len());
            set
        }
        Err(e) => {
            log::warn!("click-to-copy decoration failed, showing none: {e}");
            DecorationSet::empty()
        }
    }
}

/// Runs one decoration pass over the visible ranges of `view`.
pub fn decorate(
    view: &dyn EditorView,
    settings: &Settings,
) -> Result<DecorationSet, DecorateError> {
    if !settings.show_in_editor {
        return Ok(DecorationSet::empty());
    }

    let cursor_line = view.line_at(view.cursor())?.number;
    let visible = view.visible_ranges();

    let mut claimed: Vec<Span> = vec![];
    let mut pending: Vec<(Span, DecorationKind)> = vec![];

    let mut last_line = 0;
    for range in &visible {
        let first = view.line_at(range.start)?.number.max(last_line + 1);
        let last = view.line_at(range.end)?.number;
        for number in first..=last {
            if number == cursor_line {
                continue;
            }
            let line = view.line(number)?;
            for m in scan::scan(&line.text, settings) {
                let m = m.shifted(line.from);
                claimed.push(m.full);
                for region in m.regions(settings.hide_markdown) {
                    let kind = match region.kind {
                        RegionKind::Delimiter => DecorationKind::Mark {
                            class: widget::MARKDOWN_CLASS,
                        },
                        RegionKind::Interactive => {
                            DecorationKind::Replace(CopyWidget::from_span(&m))
                        }
                    };
                    pending.push((region.span, kind));
                }
            }
        }
        last_line = last_line.max(last);
    }

    if settings.inline_code_editor {
        for range in &visible {
            let text = view.slice(*range)?;
            for m in scan_inline_code(&text) {
                let full = m.full.shifted(range.start);
                if claimed.iter().any(|c| c.overlaps(full)) {
                    continue;
                }
                if view.line_at(full.start)?.number == cursor_line {
                    continue;
                }
                claimed.push(full);

                let replace = DecorationKind::Replace(CopyWidget::from_inline_code(&m));
                if settings.hide_code_delimiters {
                    pending.push((full, replace));
                } else {
                    let inner = m.inner.shifted(range.start);
                    let tick = DecorationKind::Mark {
                        class: widget::MARKDOWN_CLASS,
                    };
                    pending.push((Span::new(full.start, inner.start), tick.clone()));
                    pending.push((inner, replace));
                    pending.push((Span::new(inner.end, full.end), tick));
                }
            }
        }
    }

    pending.sort_by_key(|(span, _)| span.start);

    let mut builder = DecorationSetBuilder::new();
    for (span, kind) in pending {
        builder.add(span, kind)?;
    }
    Ok(builder.finish())
}
