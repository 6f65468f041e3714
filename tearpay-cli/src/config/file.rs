//! TOML file configuration structures.
//!
//! These structs directly map to the `tearpay.toml` file format. Every
//! section is optional.

use serde::{Deserialize, Serialize};
use tearpay_sdk::config::{DEFAULT_INVOICE_SERVICE_URL, DEFAULT_LEDGER_RPC_URL};
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub invoice: InvoiceConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

/// Ledger section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint used for account lookups.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: Url,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
        }
    }
}

fn default_rpc_url() -> Url {
    DEFAULT_LEDGER_RPC_URL.parse().expect("valid default rpc url")
}

/// Invoice service section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceConfig {
    /// Base URL of the page that renders invoice links.
    #[serde(default = "default_service_url")]
    pub service_url: Url,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
        }
    }
}

fn default_service_url() -> Url {
    DEFAULT_INVOICE_SERVICE_URL
        .parse()
        .expect("valid default invoice service url")
}

/// Form timing section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Idle time after the last recipient edit before the lookup fires.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// How long the "copied" confirmation stays visible.
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            toast_ms: default_toast_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_toast_ms() -> u64 {
    3000
}

/// Clipboard section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Program and arguments receiving the link on stdin, e.g.
    /// `["xclip", "-selection", "clipboard"]`. Auto-detected when unset.
    #[serde(default)]
    pub command: Option<Vec<String>>,
    /// Longest a single write may take before it counts as failed.
    #[serde(default = "default_clipboard_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            command: None,
            timeout_ms: default_clipboard_timeout_ms(),
        }
    }
}

fn default_clipboard_timeout_ms() -> u64 {
    2000
}
