//! Typed clipboard capability.
//!
//! The passcode widget only ever reads text. Hosts hand it a
//! [`ClipboardSource`]; the terminal runtime uses the system clipboard via
//! `arboard`, tests use an in-memory source.

use thiserror::Error;

/// Error surfaced when clipboard text cannot be obtained.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard is reachable (headless session, missing display server).
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    /// The clipboard exists but holds no readable text.
    #[error("clipboard read failed: {0}")]
    Read(String),
}

/// Something that can produce the current clipboard text.
pub trait ClipboardSource {
    fn read_text(&mut self) -> Result<String, ClipboardError>;
}

/// System clipboard backed by `arboard`, opened on first use.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|error| ClipboardError::Unavailable(error.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard handle missing".to_string()))
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard").field("open", &self.inner.is_some()).finish()
    }
}

impl ClipboardSource for SystemClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        self.handle()?
            .get_text()
            .map_err(|error| ClipboardError::Read(error.to_string()))
    }
}
