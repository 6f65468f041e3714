//! Ledger JSON-RPC client.

use reqwest::Client;
use url::Url;

use super::LedgerError;
use crate::config::LedgerConfig;
use crate::objects::{LedgerAccount, RpcRequest, RpcResponse, ViewAccountResult};

/// Typed HTTP client for the ledger `query` RPC.
///
/// Every lookup is a single `POST` with `finality = "final"`. There are no
/// retries; callers decide what a failure means.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    http: Client,
    rpc_url: Url,
}

impl LedgerClient {
    /// Create a new `LedgerClient` talking to `rpc_url`.
    pub fn new(rpc_url: Url) -> Self {
        Self {
            http: Client::new(),
            rpc_url,
        }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.rpc_url.clone())
    }

    /// `query` / `view_account` – fetch an account and its balance.
    pub async fn view_account(&self, account_id: &str) -> Result<LedgerAccount, LedgerError> {
        let request = RpcRequest::view_account(account_id);
        tracing::debug!(account = %account_id, rpc_url = %self.rpc_url, "Querying ledger account");

        let resp = self
            .http
            .post(self.rpc_url.clone())
            .json(&request)
            .send()
            .await?;

        let response: RpcResponse<ViewAccountResult> = parse_response(resp).await?;
        into_account(account_id, response)
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, LedgerError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(LedgerError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(LedgerError::Json)
}

fn into_account(
    account_id: &str,
    response: RpcResponse<ViewAccountResult>,
) -> Result<LedgerAccount, LedgerError> {
    if let Some(error) = response.error {
        return Err(LedgerError::AccountNotFound {
            message: error.to_string(),
        });
    }
    let Some(result) = response.result else {
        return Err(LedgerError::MalformedResponse(
            "neither result nor error present".to_string(),
        ));
    };
    if let Some(message) = result.error {
        return Err(LedgerError::AccountNotFound { message });
    }
    let amount = result
        .amount
        .ok_or_else(|| LedgerError::MalformedResponse("missing amount".to_string()))?;
    let amount: u128 = amount
        .parse()
        .map_err(|e| LedgerError::MalformedResponse(format!("invalid amount {amount:?}: {e}")))?;
    Ok(LedgerAccount {
        account_id: account_id.to_owned(),
        amount,
    })
}
