//! In-memory clipboards for tests

use std::sync::Mutex;

use super::{ClipboardBackend, ClipboardError};

/// Accepts every write and remembers it
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    writes: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl ClipboardBackend for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Fails every write
#[derive(Debug, Default)]
pub struct RejectingClipboard;

impl ClipboardBackend for RejectingClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::WriteFailed("permission denied".into()))
    }
}
