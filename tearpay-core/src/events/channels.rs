//! Event channel factories and handles.

use super::types::{FormCommand, ValidationResolved};
use tokio::sync::mpsc;

/// Default buffer size for event channels.
///
/// Keystrokes arrive in bursts; this keeps them queued without unbounded growth.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Sender handle for FormCommand events.
pub type FormCommandSender = mpsc::Sender<FormCommand>;
/// Receiver handle for FormCommand events.
pub type FormCommandReceiver = mpsc::Receiver<FormCommand>;

/// Sender handle for ValidationResolved events.
pub type ValidationResolvedSender = mpsc::Sender<ValidationResolved>;
/// Receiver handle for ValidationResolved events.
pub type ValidationResolvedReceiver = mpsc::Receiver<ValidationResolved>;

/// Create a new FormCommand channel.
///
/// Returns a (sender, receiver) pair. Multiple front-end handles can be
/// cloned from the returned sender.
pub fn form_command_channel() -> (FormCommandSender, FormCommandReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}

/// Create a new ValidationResolved channel.
pub fn validation_resolved_channel() -> (ValidationResolvedSender, ValidationResolvedReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}
