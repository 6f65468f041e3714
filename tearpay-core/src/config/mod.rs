//! Configuration types for the form session.
//!
//! The actual config loading/parsing is handled by the CLI crate.

use std::time::Duration;
use tearpay_sdk::config::InvoiceServiceConfig;

/// Idle time after the last recipient edit before the account is looked up.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// How long the "copied" confirmation stays visible.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

/// Upper bound on a single clipboard write.
pub const DEFAULT_CLIPBOARD_TIMEOUT: Duration = Duration::from_secs(2);

/// Runtime configuration of a [`FormSession`](crate::processors::FormSession).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub debounce: Duration,
    pub toast_duration: Duration,
    pub clipboard_timeout: Duration,
    pub invoice_service: InvoiceServiceConfig,
}

impl SessionConfig {
    /// Create a config with the default timings.
    pub fn new(invoice_service: InvoiceServiceConfig) -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            toast_duration: DEFAULT_TOAST_DURATION,
            clipboard_timeout: DEFAULT_CLIPBOARD_TIMEOUT,
            invoice_service,
        }
    }
}
