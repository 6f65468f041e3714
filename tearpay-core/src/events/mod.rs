//! Event system for the form session.
//!
//! # Event Flow
//!
//! 1. Front-end sends `FormCommand` -> `FormSession`
//! 2. `FormSession` debounces recipient edits and spawns a lookup task
//! 3. The lookup task sends `ValidationResolved` back -> `FormSession`
//! 4. `FormSession` publishes a `FormView` snapshot on a watch channel
//!
//! Validation results carry the generation they were issued for; the
//! session drops every result whose generation is no longer current.

pub mod channels;
pub mod types;

pub use channels::{
    DEFAULT_CHANNEL_BUFFER, FormCommandReceiver, FormCommandSender, ValidationResolvedReceiver,
    ValidationResolvedSender, form_command_channel, validation_resolved_channel,
};

pub use types::{FormCommand, SubmitReply, ValidationResolved};
