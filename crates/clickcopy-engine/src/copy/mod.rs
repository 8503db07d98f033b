//! # Copy Command Handler
//!
//! Receives the structured messages emitted by both rendering surfaces and
//! talks to the clipboard.
//!
//! ```text
//! { "name": "copyText",     "data": { "text": "..." } }   write
//! { "name": "copyPassword", "data": { "text": "..." } }   write, clear later
//! { "name": "getSettings" }                                settings snapshot
//! ```
//!
//! The delayed clear is the only background work. When it fires it compares the
//! clipboard with the copied value and only overwrites an unchanged clipboard,
//! so a user who copied something else in the meantime keeps it.

pub mod clipboard;

use std::sync::Arc;
use std::time::Duration;

use clickcopy_config::Settings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;

/// Delay before a password copy is cleared.
pub const CLEAR_DELAY: Duration = Duration::from_secs(15);

/// What a cleared clipboard holds.
pub const CLEARED_CONTENTS: &str = " ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "data", rename_all = "camelCase")]
pub enum Message {
    CopyText { text: String },
    CopyPassword { text: String },
    GetSettings,
}

impl Message {
    /// The copy message for a span, clearing later when requested.
    pub fn copy(text: impl Into<String>, clear_clipboard: bool) -> Self {
        let text = text.into();
        if clear_clipboard {
            Message::CopyPassword { text }
        } else {
            Message::CopyText { text }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The clipboard still held the copied text and was overwritten.
    Cleared,
    /// Something else was copied in the meantime; left alone.
    Superseded,
    /// Reading or writing the clipboard failed.
    Failed,
}

#[derive(Debug)]
pub enum Reply {
    Done,
    ClearScheduled(JoinHandle<ClearOutcome>),
    Settings(Settings),
}

#[derive(Debug, Error)]
pub enum CopyError {
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no async runtime available to schedule the clipboard clear")]
    NoRuntime,
}

pub struct CopyHandler {
    clipboard: Arc<dyn Clipboard>,
    settings: Settings,
    clear_after: Duration,
}

impl CopyHandler {
    pub fn new(clipboard: Arc<dyn Clipboard>, settings: Settings) -> Self {
        Self {
            clipboard,
            settings,
            clear_after: CLEAR_DELAY,
        }
    }

    #[must_use]
    pub fn with_clear_delay(mut self, delay: Duration) -> Self {
        self.clear_after = delay;
        self
    }

    /// Handles one message.
    ///
    /// `CopyPassword` spawns the delayed clear on the current tokio runtime
    /// and returns its handle; dropping the handle does not cancel it.
    pub fn handle(&self, message: Message) -> Result<Reply, CopyError> {
        match message {
            Message::CopyText { text } => {
                self.clipboard.write_text(&text)?;
                log::debug!("copied {} chars", text.chars().count());
                Ok(Reply::Done)
            }
            Message::CopyPassword { text } => {
                let runtime =
                    tokio::runtime::Handle::try_current().map_err(|_| CopyError::NoRuntime)?;
                self.clipboard.write_text(&text)?;
                log::debug!("copied password, clearing in {:?}", self.clear_after);

                let clipboard = Arc::clone(&self.clipboard);
                let delay = self.clear_after;
                let handle = runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    clear_if_unchanged(clipboard.as_ref(), &text)
                });
                Ok(Reply::ClearScheduled(handle))
            }
            Message::GetSettings => Ok(Reply::Settings(self.settings.clone())),
        }
    }

    /// Parses a JSON message and handles it.
    pub fn handle_json(&self, raw: &str) -> Result<Reply, CopyError> {
        let message: Message = serde_json::from_str(raw)?;
        self.handle(message)
    }
}

/// Overwrites the clipboard with [`CLEARED_CONTENTS`] only if it still holds
/// `copied`.
pub fn clear_if_unchanged(clipboard: &dyn Clipboard, copied: &str) -> ClearOutcome {
    match clipboard.read_text() {
        Ok(current) if current == copied => match clipboard.write_text(CLEARED_CONTENTS) {
            Ok(()) => ClearOutcome::Cleared,
            Err(e) => {
                log::warn!("failed to clear clipboard: {e}");
                ClearOutcome::Failed
            }
        },
        Ok(_) => ClearOutcome::Superseded,
        Err(e) => {
            log::warn!("failed to read clipboard before clearing: {e}");
            ClearOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn handler() -> (Arc<MemoryClipboard>, CopyHandler) {
        let clipboard = Arc::new(MemoryClipboard::new());
        let handler = CopyHandler::new(clipboard.clone(), Settings::default());
        (clipboard, handler)
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn read_text(&self) -> Result<String, ClipboardError> {
            Err(ClipboardError::Unavailable("no display".into()))
        }

        fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("no display".into()))
        }
    }

    #[test]
    fn copy_text_writes_clipboard() {
        let (clipboard, handler) = handler();

        let reply = handler
            .handle(Message::CopyText {
                text: "npm install".into(),
            })
            .unwrap();

        assert!(matches!(reply, Reply::Done));
        assert_eq!(clipboard.read_text().unwrap(), "npm install");
    }

    #[test]
    fn get_settings_returns_snapshot() {
        let (_, handler) = handler();
        match handler.handle(Message::GetSettings).unwrap() {
            Reply::Settings(s) => assert_eq!(s, Settings::default()),
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn messages_use_name_and_data() {
        let json = serde_json::to_string(&Message::CopyPassword { text: "pw".into() }).unwrap();
        assert_eq!(json, r#"{"name":"copyPassword","data":{"text":"pw"}}"#);

        let parsed: Message = serde_json::from_str(r#"{"name":"getSettings"}"#).unwrap();
        assert_eq!(parsed, Message::GetSettings);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let (_, handler) = handler();
        let err = handler.handle_json(r#"{"name":"paste"}"#).unwrap_err();
        assert!(matches!(err, CopyError::Malformed(_)));
    }

    #[test]
    fn password_copy_needs_a_runtime() {
        let (clipboard, handler) = handler();
        let err = handler
            .handle(Message::CopyPassword { text: "pw".into() })
            .unwrap_err();

        assert!(matches!(err, CopyError::NoRuntime));
        assert_eq!(clipboard.read_text().unwrap(), "");
    }

    #[test]
    fn clipboard_failures_propagate() {
        let handler = CopyHandler::new(Arc::new(BrokenClipboard), Settings::default());
        let err = handler
            .handle(Message::CopyText { text: "x".into() })
            .unwrap_err();
        assert!(matches!(err, CopyError::Clipboard(_)));
    }

    #[test]
    fn copy_constructor_picks_kind() {
        assert_eq!(
            Message::copy("a", false),
            Message::CopyText { text: "a".into() }
        );
        assert_eq!(
            Message::copy("a", true),
            Message::CopyPassword { text: "a".into() }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn password_is_cleared_when_unchanged() {
        let (clipboard, handler) = handler();

        let Reply::ClearScheduled(pending) = handler
            .handle_json(r#"{"name":"copyPassword","data":{"text":"T"}}"#)
            .unwrap()
        else {
            panic!("expected a scheduled clear");
        };
        assert_eq!(clipboard.read_text().unwrap(), "T");

        assert_eq!(pending.await.unwrap(), ClearOutcome::Cleared);
        assert_eq!(clipboard.read_text().unwrap(), " ");
    }

    #[tokio::test(start_paused = true)]
    async fn newer_copy_is_not_clobbered() {
        let (clipboard, handler) = handler();

        let Reply::ClearScheduled(pending) = handler
            .handle(Message::CopyPassword { text: "T".into() })
            .unwrap()
        else {
            panic!("expected a scheduled clear");
        };
        clipboard.write_text("U").unwrap();

        assert_eq!(pending.await.unwrap(), ClearOutcome::Superseded);
        assert_eq!(clipboard.read_text().unwrap(), "U");
    }

    #[tokio::test(start_paused = true)]
    async fn clear_waits_for_the_delay() {
        let (clipboard, handler) = handler();
        let handler = handler.with_clear_delay(Duration::from_secs(15));

        let Reply::ClearScheduled(pending) = handler
            .handle(Message::CopyPassword { text: "T".into() })
            .unwrap()
        else {
            panic!("expected a scheduled clear");
        };

        tokio::time::sleep(Duration::from_secs(14)).await;
        assert_eq!(clipboard.read_text().unwrap(), "T");
        assert!(!pending.is_finished());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(pending.await.unwrap(), ClearOutcome::Cleared);
    }

    #[test]
    fn clear_reports_read_failure() {
        assert_eq!(
            clear_if_unchanged(&BrokenClipboard, "x"),
            ClearOutcome::Failed
        );
    }
}
