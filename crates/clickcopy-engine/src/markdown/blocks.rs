//! Block splitting: paragraphs and fenced code, nothing else.
//!
//! Fenced code is a raw zone: its lines are never handed to the inline
//! parser, so spans inside a fence render as literal text.

use xi_rope::Rope;

use crate::rope::{LineRef, lines_with_spans};
use crate::scan::fence::{CodeFence, FenceSig};
use crate::span::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// Lines joined with `\n`, leading indentation removed.
    Paragraph,
    /// Raw lines between the fences, each ending in `\n`.
    Fence { info: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Document span covered by the block, fences included.
    pub span: Span,
    pub content: String,
}

/// Splits `rope` into blocks. An unclosed fence runs to the end of the
/// document.
pub fn split_blocks(rope: &Rope) -> Vec<Block> {
    let mut out = vec![];
    let mut paragraph: Vec<LineRef> = vec![];
    let mut fence: Option<(FenceSig, LineRef, String, Vec<LineRef>)> = None;

    for line in lines_with_spans(rope) {
        if let Some((sig, opener, info, mut body)) = fence.take() {
            if CodeFence::closes(sig, &line.text) {
                out.push(fence_block(&opener, info, &body, line.raw.end));
            } else {
                body.push(line);
                fence = Some((sig, opener, info, body));
            }
            continue;
        }

        if let Some(sig) = CodeFence::sig(&line.text) {
            flush_paragraph(&mut paragraph, &mut out);
            let info = fence_info(&line.text);
            fence = Some((sig, line, info, vec![]));
            continue;
        }

        if line.text.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut out);
        } else {
            paragraph.push(line);
        }
    }

    if let Some((_, opener, info, body)) = fence {
        let end = body.last().map_or(opener.raw.end, |l| l.raw.end);
        out.push(fence_block(&opener, info, &body, end));
    }
    flush_paragraph(&mut paragraph, &mut out);
    out
}

fn flush_paragraph(lines: &mut Vec<LineRef>, out: &mut Vec<Block>) {
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return;
    };
    let span = Span::new(first.span.start, last.span.end);
    let content = lines
        .iter()
        .map(|l| l.text.trim_start())
        .collect::<Vec<_>>()
        .join("\n");
    out.push(Block {
        kind: BlockKind::Paragraph,
        span,
        content,
    });
    lines.clear();
}

fn fence_block(opener: &LineRef, info: String, body: &[LineRef], end: usize) -> Block {
    let content = body.iter().map(|l| format!("{}\n", l.text)).collect();
    Block {
        kind: BlockKind::Fence { info },
        span: Span::new(opener.span.start, end),
        content,
    }
}

/// First word of the info string after the fence run.
fn fence_info(line: &str) -> String {
    line.trim_start()
        .trim_start_matches(['`', '~'])
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}
