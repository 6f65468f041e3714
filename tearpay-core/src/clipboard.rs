//! Clipboard seam.
//!
//! Writing to the clipboard is a single scoped, fallible operation. The
//! session never retries and never treats a failure as fatal.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while writing to the clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The platform refused access.
    #[error("clipboard access denied: {0}")]
    Denied(String),

    /// No clipboard is available in this environment.
    #[error("no clipboard available")]
    Unavailable,

    /// Talking to the clipboard backend failed.
    #[error("clipboard io error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend did not finish the write in time.
    #[error("clipboard write timed out after {0:?}")]
    TimedOut(Duration),
}

/// Something that can receive text, typically the system clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard used when none is configured; every write is refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

#[async_trait]
impl Clipboard for NoClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}
