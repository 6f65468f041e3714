//! Ledger RPC configuration.

use url::Url;

/// Public RPC endpoint queried when nothing else is configured.
pub const DEFAULT_LEDGER_RPC_URL: &str = "https://rpc.mainnet.near.org";

/// Where account lookups are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint of the ledger node.
    pub rpc_url: Url,
}

impl LedgerConfig {
    pub fn new(rpc_url: Url) -> Self {
        Self { rpc_url }
    }
}
