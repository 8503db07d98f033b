use clickcopy_config::Settings;

use super::action::Action;
use super::inline::{InlineRule, InlineState, Token};
use crate::editor::widget::CTC_CLASS;
use crate::grammar::Delimiters;
use crate::scan;

/// Click-to-copy spans in inline markdown.
///
/// The match is anchored at the parser position and bounded by `pos_max`;
/// anything the grammar does not accept here is left to the later rules.
#[derive(Debug, Clone)]
pub struct ClickToCopy {
    start: String,
    end: String,
}

impl ClickToCopy {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let (start, end) = settings.effective_tokens();
        Self::new(start, end)
    }
}

impl InlineRule for ClickToCopy {
    fn name(&self) -> &'static str {
        "click_to_copy"
    }

    fn trigger(&self) -> Option<char> {
        self.start.chars().next()
    }

    fn apply(&self, state: &mut InlineState<'_>, silent: bool) -> bool {
        let delims = Delimiters::new(&self.start, &self.end);
        let src = state.src;
        let window = &src[..state.pos_max];
        let Some(m) = scan::match_span_at(window, state.pos, &delims) else {
            return false;
        };

        if !silent {
            state.push(Token::SpanOpen {
                classes: vec![CTC_CLASS],
                action: Action::for_span(&m),
            });
            state.push(if m.is_code_styled {
                Token::CodeInline(m.display_text.clone())
            } else {
                Token::Text(m.display_text.clone())
            });
            state.push(Token::SpanClose);
        }
        state.pos = m.full.end;
        true
    }
}
