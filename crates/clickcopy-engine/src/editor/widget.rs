use serde::Serialize;

use crate::copy::Message;
use crate::grammar;
use crate::scan::SpanMatch;
use crate::scan::inline_code::InlineCodeMatch;

pub const CTC_CLASS: &str = "ctc";
pub const INLINE_CODE_CLASS: &str = "cm-inlineCode";
pub const MARKDOWN_CLASS: &str = "ctc-markdown";

/// The interactive element that replaces a span's text in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyWidget {
    /// Unmasked text shown in place of the source.
    label: String,
    copy_text: String,
    is_password: bool,
    clear_clipboard: bool,
    is_code: bool,
    revealed: bool,
}

impl CopyWidget {
    pub fn from_span(m: &SpanMatch) -> Self {
        Self {
            label: m.copy_text.clone(),
            copy_text: m.copy_text.clone(),
            is_password: m.is_password,
            clear_clipboard: m.clear_clipboard,
            is_code: m.is_code_styled,
            revealed: false,
        }
    }

    pub fn from_inline_code(m: &InlineCodeMatch) -> Self {
        Self {
            label: m.display_text.clone(),
            copy_text: m.copy_text.clone(),
            is_password: false,
            clear_clipboard: false,
            is_code: true,
            revealed: false,
        }
    }

    /// The text currently shown: masked for a hidden password.
    pub fn text(&self) -> String {
        if self.is_password && !self.revealed {
            grammar::mask(&self.label)
        } else {
            self.label.clone()
        }
    }

    pub fn classes(&self) -> Vec<&'static str> {
        if self.is_code {
            vec![CTC_CLASS, INLINE_CODE_CLASS]
        } else {
            vec![CTC_CLASS]
        }
    }

    /// DOM attributes set on the widget element.
    pub fn attributes(&self) -> [(&'static str, &'static str); 2] {
        [("spellcheck", "false"), ("autocorrect", "false")]
    }

    pub fn is_password(&self) -> bool {
        self.is_password
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Primary activation (click): the copy request for this span.
    pub fn activate_primary(&self) -> Message {
        Message::copy(self.copy_text.clone(), self.clear_clipboard)
    }

    /// Secondary activation (context menu): toggles a password between masked
    /// and revealed. Returns whether anything changed.
    pub fn activate_secondary(&mut self) -> bool {
        if !self.is_password {
            return false;
        }
        self.revealed = !self.revealed;
        true
    }

    /// Widgets swallow pointer events so activation never moves the cursor.
    pub fn ignores_events(&self) -> bool {
        true
    }
}
