//! Code sample with copy-to-clipboard feedback

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::ClipboardBackend;

/// How long the "copied" indicator stays on after a successful copy
pub const COPIED_FEEDBACK: Duration = Duration::from_millis(2000);

/// A fixed code sample that can be copied verbatim
///
/// Clones share the same `copied` flag, so a panel handed to a background
/// copy task and the panel being rendered see the same feedback state.
#[derive(Debug, Clone)]
pub struct ClipboardCodePanel {
    code: Arc<str>,
    language: Option<String>,
    title: Option<String>,
    copied: Arc<AtomicBool>,
}

impl ClipboardCodePanel {
    pub fn new(code: impl Into<Arc<str>>) -> Self {
        Self { code: code.into(), language: None, title: None, copied: Arc::default() }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// File name shown in the panel header, e.g. `simple_agent.py`
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// True while the "copied" feedback window is open
    pub fn is_copied(&self) -> bool {
        self.copied.load(Ordering::Relaxed)
    }

    /// Copy the code to `backend`.
    ///
    /// On success the copied flag turns on and a background task turns it
    /// off again after [`COPIED_FEEDBACK`]. Earlier pending reverts are left
    /// running; they all end in the same state. Failures are logged and
    /// reported through the return value only.
    pub async fn copy<B: ClipboardBackend>(&self, backend: &B) -> bool {
        match backend.write_text(&self.code).await {
            Ok(()) => {
                self.copied.store(true, Ordering::Relaxed);
                let revert = tokio::time::sleep(COPIED_FEEDBACK);
                let copied = Arc::clone(&self.copied);
                tokio::spawn(async move {
                    revert.await;
                    copied.store(false, Ordering::Relaxed);
                });
                tracing::debug!(
                    language = self.language.as_deref().unwrap_or("text"),
                    bytes = self.code.len(),
                    "copied code sample"
                );
                true
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    title = self.title.as_deref().unwrap_or("untitled"),
                    "failed to copy code sample"
                );
                false
            }
        }
    }
}
