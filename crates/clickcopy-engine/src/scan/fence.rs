#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    fn marker(self) -> char {
        match self {
            FenceKind::Backticks => '`',
            FenceKind::Tildes => '~',
        }
    }
}

/// A fence delimiter line: its marker kind and run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    pub len: usize,
}

pub struct CodeFence;

impl CodeFence {
    pub const MIN_RUN: usize = 3;
    const MAX_INDENT: usize = 3;

    /// Detects a fence delimiter at the start of `line` (up to three spaces of
    /// indentation allowed).
    pub fn sig(line: &str) -> Option<FenceSig> {
        let t = line.trim_end_matches(['\r', '\n']);
        let indent = t.len() - t.trim_start_matches(' ').len();
        if indent > Self::MAX_INDENT {
            return None;
        }
        let rest = &t[indent..];
        let kind = match rest.chars().next()? {
            '`' => FenceKind::Backticks,
            '~' => FenceKind::Tildes,
            _ => return None,
        };
        let len = rest.chars().take_while(|&c| c == kind.marker()).count();
        if len < Self::MIN_RUN {
            return None;
        }
        // A backtick info string may not contain backticks, otherwise the line
        // is inline code.
        if kind == FenceKind::Backticks && rest[len..].contains('`') {
            return None;
        }
        Some(FenceSig { kind, len })
    }

    /// True when `line` closes a fence opened with `open`: same marker, a run
    /// at least as long, and nothing but whitespace after it.
    pub fn closes(open: FenceSig, line: &str) -> bool {
        let Some(sig) = Self::sig(line) else {
            return false;
        };
        if sig.kind != open.kind || sig.len < open.len {
            return false;
        }
        let t = line.trim();
        t[sig.len..].trim().is_empty()
    }
}
