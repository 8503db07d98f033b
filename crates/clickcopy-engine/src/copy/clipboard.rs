use std::sync::Mutex;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard access failed: {0}")]
    Access(String),
}

/// A text clipboard shared by every view. Implementations must tolerate
/// concurrent readers and writers.
pub trait Clipboard: Send + Sync {
    fn read_text(&self) -> Result<String, ClipboardError>;

    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// In-process clipboard, for tests and headless rendering.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn read_text(&self) -> Result<String, ClipboardError> {
        self.contents
            .lock()
            .map(|c| c.clone())
            .map_err(|e| ClipboardError::Access(e.to_string()))
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|e| ClipboardError::Access(e.to_string()))?;
        *contents = text.to_string();
        Ok(())
    }
}

/// The desktop clipboard via `arboard`.
#[cfg(feature = "system-clipboard")]
pub struct SystemClipboard {
    inner: Mutex<arboard::Clipboard>,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self {
            inner: Mutex::new(inner),
        })
    }
}

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn read_text(&self) -> Result<String, ClipboardError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| ClipboardError::Access(e.to_string()))?;
        inner
            .get_text()
            .map_err(|e| ClipboardError::Access(e.to_string()))
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| ClipboardError::Access(e.to_string()))?;
        inner
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::Access(e.to_string()))
    }
}
