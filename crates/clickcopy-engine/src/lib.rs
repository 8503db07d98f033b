//! # clickcopy-engine
//!
//! Recognition and rendering of click-to-copy spans: text wrapped in
//! configurable tokens (`[[like this]]`) that copies itself when clicked.
//!
//! ## Layers
//!
//! - [`grammar`]: the one definition of a span, anchored at a byte offset
//! - [`scan`]: line scanning on top of the grammar, plus fence-aware inline
//!   code scanning
//! - [`editor`]: decorations for a live editor view, and the toolbar command
//! - [`markdown`]: static HTML rendering through a small inline rule harness
//! - [`copy`]: the clipboard side, including the delayed clear for passwords
//!
//! The editor and markdown surfaces never talk to each other; both go through
//! [`scan::match_span_at`] and agree on every single-line input outside
//! markdown code spans.

pub mod copy;
pub mod editor;
pub mod grammar;
pub mod markdown;
pub mod rope;
pub mod scan;
pub mod span;

pub use clickcopy_config::Settings;
pub use copy::{CopyHandler, Message, Reply};
pub use editor::{Decorator, EditorView, RopeView, ViewUpdate, decorate};
pub use markdown::render_html;
pub use scan::{SpanMatch, scan};
pub use span::Span;
