//! System clipboard through a helper program.
//!
//! The invoice link is piped to the stdin of `pbcopy`, `wl-copy`, `xclip`
//! or whatever command the config names.
//!
//! `xclip` and `wl-copy` fork a child that keeps serving the selection, so
//! only the exit status of the helper itself is awaited. Its stdout and
//! stderr go to null; a pipe inherited by the forked child would never
//! reach end of file.

use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tearpay_core::clipboard::{Clipboard, ClipboardError, NoClipboard};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Clipboard backed by an external program reading the text on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: tearpay_core::config::DEFAULT_CLIPBOARD_TIMEOUT,
        }
    }

    /// Give up on the helper after `timeout`; it is killed on the way out.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn pipe(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ClipboardError::Unavailable,
                _ => ClipboardError::Io(e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            // dropping stdin closes the pipe so the helper can exit
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(ClipboardError::Denied(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }

    /// Build from a `[program, args...]` list.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    /// Pick a helper for the current platform and display server.
    pub fn detect() -> Option<Self> {
        if cfg!(target_os = "macos") {
            return Some(Self::new("pbcopy", vec![]));
        }
        if cfg!(target_os = "windows") {
            return Some(Self::new("clip", vec![]));
        }
        if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            return Some(Self::new("wl-copy", vec![]));
        }
        if std::env::var_os("DISPLAY").is_some() {
            return Some(Self::new(
                "xclip",
                vec!["-selection".to_string(), "clipboard".to_string()],
            ));
        }
        None
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        tokio::time::timeout(self.timeout, self.pipe(text))
            .await
            .map_err(|_| ClipboardError::TimedOut(self.timeout))?
    }
}

/// Clipboard for the configured command, the detected helper, or none.
pub fn from_config(command: Option<&[String]>, timeout: Duration) -> Arc<dyn Clipboard> {
    let clipboard = match command {
        Some(argv) => CommandClipboard::from_argv(argv),
        None => CommandClipboard::detect(),
    };
    match clipboard {
        Some(clipboard) => {
            tracing::debug!(program = %clipboard.program, ?timeout, "Using clipboard helper");
            Arc::new(clipboard.with_timeout(timeout))
        }
        None => {
            tracing::warn!("No clipboard helper found, invoice links will only be printed");
            Arc::new(NoClipboard)
        }
    }
}
