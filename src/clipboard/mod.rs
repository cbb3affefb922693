//! Clipboard access for code panels
//!
//! The platform clipboard sits behind [`ClipboardBackend`] so code panels can
//! be exercised against in-memory backends in tests. [`SystemClipboard`] is
//! the real thing, backed by `arboard`.

mod panel;
#[cfg(test)]
pub(crate) mod testing;

use std::future::Future;

use thiserror::Error;

pub use panel::{COPIED_FEEDBACK, ClipboardCodePanel};

/// Failure to place text on the clipboard
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::WriteFailed(err.to_string())
    }
}

/// Something that can receive copied text
pub trait ClipboardBackend: Send + Sync + 'static {
    /// Write `text` verbatim to the clipboard
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> + Send;
}

/// The operating system clipboard
///
/// `arboard` is synchronous, so every write runs on tokio's blocking pool.
/// A fresh handle is opened per write to avoid holding display resources.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardBackend for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_owned();
        tokio::task::spawn_blocking(move || -> Result<(), ClipboardError> {
            let mut clipboard = arboard::Clipboard::new()?;
            clipboard.set_text(text)?;
            Ok(())
        })
        .await
        .map_err(|err| ClipboardError::WriteFailed(format!("clipboard task failed: {err}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_includes_cause() {
        let err = ClipboardError::WriteFailed("no display".into());
        assert_eq!(err.to_string(), "clipboard write failed: no display");
    }
}
