//! Toolbar command that wraps the selection in a click-to-copy span.

use std::ops::Range;

use clickcopy_config::Settings;
use xi_rope::{Delta, Rope, RopeInfo};

/// Content of the span inserted for an empty selection.
pub const PLACEHOLDER: &str = "Insert text here";

/// Which editing surface the host currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    PlainText,
    RichText,
}

/// The command only operates on the plain-text surface.
pub fn is_enabled(surface: Surface) -> bool {
    surface == Surface::PlainText
}

/// Builds the edit that wraps `selection` in the configured tokens.
///
/// An empty selection inserts a placeholder span. A selection spanning more
/// than one line yields `None`.
pub fn insert_span(
    rope: &Rope,
    selection: Range<usize>,
    settings: &Settings,
) -> Option<Delta<RopeInfo>> {
    let (start, end) = settings.effective_tokens();
    let len = rope.len();
    let from = selection.start.min(selection.end).min(len);
    let to = selection.start.max(selection.end).min(len);

    let selected = rope.slice_to_cow(from..to);
    if selected.contains(['\n', '\r']) {
        log::debug!("not wrapping a multi-line selection");
        return None;
    }
    let content = if selected.is_empty() {
        PLACEHOLDER
    } else {
        selected.as_ref()
    };

    let replacement = format!("{start}{content}{end}");
    Some(Delta::simple_edit(from..to, Rope::from(replacement), len))
}
