//! JSON-RPC wire format of the account ledger.
//!
//! Only the `view_account` query is modelled:
//!
//! ```text
//! -> {"jsonrpc":"2.0","id":"dontcare","method":"query",
//!     "params":{"request_type":"view_account","finality":"final","account_id":"example.near"}}
//! <- {"jsonrpc":"2.0","id":"dontcare","result":{"amount":"500000", ...}}
//! <- {"jsonrpc":"2.0","id":"dontcare","error":{"name":"HANDLER_ERROR", ...}}
//! ```

use serde::{Deserialize, Serialize};

/// Finality requested for every ledger query.
pub const FINALITY_FINAL: &str = "final";

/// JSON-RPC request envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcRequest<P> {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    pub params: P,
}

impl RpcRequest<ViewAccountParams> {
    /// Build a `query` / `view_account` request for `account_id`.
    pub fn view_account(account_id: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: "dontcare".to_string(),
            method: "query".to_string(),
            params: ViewAccountParams {
                request_type: "view_account".to_string(),
                finality: FINALITY_FINAL.to_string(),
                account_id: account_id.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewAccountParams {
    pub request_type: String,
    pub finality: String,
    pub account_id: String,
}

/// JSON-RPC response envelope. Exactly one of `result` and `error` is
/// expected, but both are optional so a malformed body can be reported.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RpcResponse<T> {
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// `view_account` result body.
///
/// Some ledger nodes report a missing account inside `result.error`
/// instead of the top-level error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewAccountResult {
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub locked: Option<String>,
    #[serde(default)]
    pub storage_usage: Option<u64>,
    #[serde(default)]
    pub block_height: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// An existing ledger account and its liquid balance in the smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LedgerAccount {
    pub account_id: String,
    pub amount: u128,
}

impl LedgerAccount {
    pub fn has_balance(&self) -> bool {
        self.amount > 0
    }
}
