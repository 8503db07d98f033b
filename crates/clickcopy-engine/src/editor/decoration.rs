use serde::Serialize;

use super::DecorateError;
use super::widget::CopyWidget;
use crate::span::Span;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DecorationKind {
    /// Keep the text, add a CSS class.
    Mark { class: &'static str },
    /// Hide the text behind a widget.
    Replace(CopyWidget),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoration {
    pub range: Span,
    pub kind: DecorationKind,
}

impl Decoration {
    pub fn widget(&self) -> Option<&CopyWidget> {
        match &self.kind {
            DecorationKind::Replace(w) => Some(w),
            DecorationKind::Mark { .. } => None,
        }
    }
}

/// An ordered set of non-overlapping decorations for one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecorationSet {
    items: Vec<Decoration>,
}

impl DecorationSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Decoration> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The widget whose range contains `offset`.
    pub fn widget_at(&self, offset: usize) -> Option<&CopyWidget> {
        self.items
            .iter()
            .find(|d| d.range.contains(offset))
            .and_then(Decoration::widget)
    }

    pub fn widget_at_mut(&mut self, offset: usize) -> Option<&mut CopyWidget> {
        self.items
            .iter_mut()
            .find(|d| d.range.contains(offset))
            .and_then(|d| match &mut d.kind {
                DecorationKind::Replace(w) => Some(w),
                DecorationKind::Mark { .. } => None,
            })
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Builds a [`DecorationSet`]; ranges must arrive in order and not overlap.
#[derive(Debug, Default)]
pub struct DecorationSetBuilder {
    items: Vec<Decoration>,
}

impl DecorationSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, range: Span, kind: DecorationKind) -> Result<(), DecorateError> {
        if range.is_empty() {
            return Err(DecorateError::EmptyRange(range));
        }
        if let Some(last) = self.items.last()
            && range.start < last.range.end
        {
            return Err(DecorateError::Unordered {
                previous: last.range,
                next: range,
            });
        }
        self.items.push(Decoration { range, kind });
        Ok(())
    }

    pub fn finish(self) -> DecorationSet {
        DecorationSet { items: self.items }
    }
}
