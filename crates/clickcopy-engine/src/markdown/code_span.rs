use super::action::Action;
use super::inline::{InlineRule, InlineState, Token};
use crate::editor::widget::CTC_CLASS;
use crate::scan::inline_code::normalize_code;

const TICK: char = '`';

/// Backtick code spans. Everything between matching runs is literal, which
/// is why this rule runs before click-to-copy.
///
/// With `clickable` set the span is wrapped in a click-to-copy container.
pub struct CodeSpan {
    pub clickable: bool,
}

impl InlineRule for CodeSpan {
    fn name(&self) -> &'static str {
        "code_span"
    }

    fn trigger(&self) -> Option<char> {
        Some(TICK)
    }

    fn apply(&self, state: &mut InlineState<'_>, silent: bool) -> bool {
        if state.peek() != Some(TICK) {
            return false;
        }
        let src = state.src;
        let max = state.pos_max;
        let start = state.pos;
        let opener_end = run_end(src, start, max);
        let marker = &src[start..opener_end];
        let opener_len = marker.len();

        // A previous scan already proved there is no closer of this length
        // after `start`.
        if state.backticks_scanned
            && state.backticks.get(&opener_len).copied().unwrap_or(0) <= start
        {
            if !silent {
                state.push_pending(marker);
            }
            state.pos = opener_end;
            return true;
        }

        let mut match_end = opener_end;
        while let Some(found) = src[match_end..max].find(TICK) {
            let match_start = match_end + found;
            match_end = run_end(src, match_start, max);
            let closer_len = match_end - match_start;
            if closer_len == opener_len {
                if !silent {
                    self.emit(state, &src[opener_end..match_start]);
                }
                state.pos = match_end;
                return true;
            }
            state.backticks.insert(closer_len, match_start);
        }

        state.backticks_scanned = true;
        if !silent {
            state.push_pending(marker);
        }
        state.pos = opener_end;
        true
    }
}

impl CodeSpan {
    fn emit(&self, state: &mut InlineState<'_>, raw: &str) {
        let joined = raw.replace('\n', " ");
        let content = normalize_code(&joined).to_string();
        if self.clickable {
            state.push(Token::SpanOpen {
                classes: vec![CTC_CLASS],
                action: Action::for_code(&content),
            });
            state.push(Token::CodeInline(content));
            state.push(Token::SpanClose);
        } else {
            state.push(Token::CodeInline(content));
        }
    }
}

fn run_end(src: &str, from: usize, max: usize) -> usize {
    from + src[from..max].len() - src[from..max].trim_start_matches(TICK).len()
}
