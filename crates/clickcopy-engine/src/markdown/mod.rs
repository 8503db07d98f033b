//! # Markdown Surface
//!
//! One-shot rendering of a document to static HTML with click-to-copy spans.
//!
//! ## Pipeline
//!
//! 1. [`blocks::split_blocks`] cuts the source into paragraphs and fenced code
//! 2. each paragraph goes through the inline [`inline::RuleList`]
//! 3. tokens are written out by [`html`]
//!
//! Spans render as `<span class="ctc" data-ctc-action="...">` with the
//! behaviour carried as a JSON [`action::Action`]. Delimiters are always
//! removed from the output.

pub mod action;
pub mod blocks;
pub mod click_to_copy;
pub mod code_span;
pub mod html;
pub mod inline;

use clickcopy_config::Settings;
use thiserror::Error;
use xi_rope::Rope;

use blocks::BlockKind;
use inline::{InlineState, RuleList};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode span action: {0}")]
    Action(#[from] serde_json::Error),
}

/// Renders `source` to HTML.
pub fn render_html(source: &str, settings: &Settings) -> Result<String, RenderError> {
    let rope = Rope::from(source);
    let rules = RuleList::standard(settings);
    let mut out = String::new();

    for block in blocks::split_blocks(&rope) {
        match &block.kind {
            BlockKind::Paragraph => {
                let mut state = InlineState::new(&block.content, settings);
                rules.tokenize(&mut state);
                out.push_str("<p>");
                html::render_inline(&state.finish(), &mut out)?;
                out.push_str("</p>\n");
            }
            BlockKind::Fence { info } => html::render_fence(info, &block.content, &mut out),
        }
    }

    log::debug!("rendered {} bytes of markdown", source.len());
    Ok(out)
}
