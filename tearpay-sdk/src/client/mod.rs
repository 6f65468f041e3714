//! HTTP client for the account ledger.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod ledger;

pub use ledger::LedgerClient;

use reqwest::StatusCode;

/// Errors produced by the ledger client.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The node returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The ledger answered with an error object, typically an unknown account.
    #[error("account not found: {message}")]
    AccountNotFound { message: String },

    /// The body was valid JSON but not a usable `view_account` answer.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
