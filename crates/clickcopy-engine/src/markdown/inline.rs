//! # Inline Rule Harness
//!
//! A small rule-driven inline tokenizer. At each position the rules of a
//! [`RuleList`] are tried in order; the first one that accepts advances the
//! position and (unless probing silently) pushes tokens.
//!
//! ## Rule order
//!
//! 1. `newline`: soft and hard breaks
//! 2. `code_span`: backtick runs, a raw zone for everything after it
//! 3. `click_to_copy`: delimited spans
//! 4. `text`: plain text up to the next terminator char
//!
//! Start tokens that begin with a backtick swap 2 and 3; a single-backtick
//! token pair drops `code_span` altogether.
//!
//! The text rule stops at the fixed markdown terminator set *and* at the
//! trigger char of every other rule in the list, so a rule is always offered
//! the position its trigger starts at. Positions no rule accepts become one
//! char of pending text.

use std::collections::HashMap;

use clickcopy_config::Settings;

use super::action::Action;
use crate::grammar::Delimiters;

/// Chars the text rule never consumes.
pub const TERMINATORS: &[char] = &[
    '\n', '!', '#', '$', '%', '&', '*', '+', '-', ':', '<', '=', '>', '@', '[', '\\', ']', '^',
    '_', '`', '{', '}', '~',
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(String),
    CodeInline(String),
    SoftBreak,
    HardBreak,
    SpanOpen {
        classes: Vec<&'static str>,
        action: Action,
    },
    SpanClose,
}

/// Per-parse state: one paragraph's source and the tokens produced so far.
#[derive(Debug)]
pub struct InlineState<'a> {
    pub src: &'a str,
    pub pos: usize,
    pub pos_max: usize,
    pub settings: &'a Settings,
    tokens: Vec<Token>,
    pending: String,
    /// Closing backtick runs already seen, by run length: the offset of the
    /// last one. Lives for one parse.
    pub(crate) backticks: HashMap<usize, usize>,
    pub(crate) backticks_scanned: bool,
}

impl<'a> InlineState<'a> {
    pub fn new(src: &'a str, settings: &'a Settings) -> Self {
        Self {
            src,
            pos: 0,
            pos_max: src.len(),
            settings,
            tokens: vec![],
            pending: String::new(),
            backticks: HashMap::new(),
            backticks_scanned: false,
        }
    }

    /// The unparsed remainder.
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..self.pos_max]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Pushes a token, flushing pending text first.
    pub fn push(&mut self, token: Token) {
        self.flush_pending();
        self.tokens.push(token);
    }

    pub fn push_pending(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    pub fn flush_pending(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.tokens.push(Token::Text(text));
        }
    }

    /// Trailing spaces of the pending text, removed.
    fn trim_pending_spaces(&mut self) -> usize {
        let kept = self.pending.trim_end_matches(' ').len();
        let trimmed = self.pending.len() - kept;
        self.pending.truncate(kept);
        trimmed
    }

    pub fn finish(mut self) -> Vec<Token> {
        self.flush_pending();
        self.tokens
    }
}

pub trait InlineRule {
    fn name(&self) -> &'static str;

    /// The char this rule can start at, if it has a fixed one.
    fn trigger(&self) -> Option<char>;

    /// Tries the rule at `state.pos`. On success the position has moved past
    /// the construct; tokens are pushed only when `silent` is false.
    fn apply(&self, state: &mut InlineState<'_>, silent: bool) -> bool;
}

/// Ordered inline rules plus the text fallback.
pub struct RuleList {
    rules: Vec<Box<dyn InlineRule>>,
    text: Text,
}

impl RuleList {
    pub fn new(rules: Vec<Box<dyn InlineRule>>) -> Self {
        let mut terminators = TERMINATORS.to_vec();
        for trigger in rules.iter().filter_map(|r| r.trigger()) {
            if !terminators.contains(&trigger) {
                terminators.push(trigger);
            }
        }
        Self {
            rules,
            text: Text { terminators },
        }
    }

    /// newline, code span, click-to-copy.
    ///
    /// A start token beginning with a backtick moves click-to-copy ahead of
    /// code spans. With a single-backtick pair every code span already is a
    /// click-to-copy span, so the code span rule is left out and unmatched
    /// ticks fall through one char at a time, as in the line scanner.
    pub fn standard(settings: &Settings) -> Self {
        let delims = Delimiters::from_settings(settings);
        let click: Box<dyn InlineRule> =
            Box::new(super::click_to_copy::ClickToCopy::from_settings(settings));
        let code: Box<dyn InlineRule> = Box::new(super::code_span::CodeSpan {
            clickable: settings.inline_code_webview,
        });

        let rules: Vec<Box<dyn InlineRule>> = if delims.is_backtick_pair() {
            vec![Box::new(Newline), click]
        } else if delims.start.starts_with('`') {
            vec![Box::new(Newline), click, code]
        } else {
            vec![Box::new(Newline), code, click]
        };
        Self::new(rules)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .map(|r| r.name())
            .chain(std::iter::once(self.text.name()))
            .collect()
    }

    pub fn terminators(&self) -> &[char] {
        &self.text.terminators
    }

    /// Tokenizes `state` to the end.
    pub fn tokenize(&self, state: &mut InlineState<'_>) {
        while state.pos < state.pos_max {
            if !self.step(state, false) {
                let src = state.src;
                let at = state.pos;
                let ch = state.peek().map_or(1, char::len_utf8);
                state.push_pending(&src[at..at + ch]);
                state.pos += ch;
            }
        }
    }

    /// Silent probe: moves past the construct at the current position
    /// without emitting anything.
    pub fn skip_token(&self, state: &mut InlineState<'_>) {
        if !self.step(state, true) {
            state.pos += state.peek().map_or(1, char::len_utf8);
        }
    }

    fn step(&self, state: &mut InlineState<'_>, silent: bool) -> bool {
        let before = state.pos;
        for rule in &self.rules {
            if rule.apply(state, silent) {
                debug_assert!(state.pos > before, "rule {} did not advance", rule.name());
                return true;
            }
        }
        self.text.apply(state, silent)
    }
}

/// Parses `src` with the standard rules.
pub fn parse_inline(src: &str, settings: &Settings) -> Vec<Token> {
    let rules = RuleList::standard(settings);
    let mut state = InlineState::new(src, settings);
    rules.tokenize(&mut state);
    state.finish()
}

struct Text {
    terminators: Vec<char>,
}

impl InlineRule for Text {
    fn name(&self) -> &'static str {
        "text"
    }

    fn trigger(&self) -> Option<char> {
        None
    }

    fn apply(&self, state: &mut InlineState<'_>, silent: bool) -> bool {
        let rest = state.rest();
        let len = rest
            .find(|c: char| self.terminators.contains(&c))
            .unwrap_or(rest.len());
        if len == 0 {
            return false;
        }
        if !silent {
            state.push_pending(&rest[..len]);
        }
        state.pos += len;
        true
    }
}

/// `\n` becomes a soft break, or a hard break after two or more spaces.
/// Leading spaces of the next line are skipped.
pub struct Newline;

impl InlineRule for Newline {
    fn name(&self) -> &'static str {
        "newline"
    }

    fn trigger(&self) -> Option<char> {
        Some('\n')
    }

    fn apply(&self, state: &mut InlineState<'_>, silent: bool) -> bool {
        if state.peek() != Some('\n') {
            return false;
        }
        if !silent {
            let trailing = state.trim_pending_spaces();
            state.push(if trailing >= 2 {
                Token::HardBreak
            } else {
                Token::SoftBreak
            });
        }
        state.pos += 1;
        let rest = state.rest();
        state.pos += rest.len() - rest.trim_start_matches(' ').len();
        true
    }
}
