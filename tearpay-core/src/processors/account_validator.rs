//! AccountValidator processor.
//!
//! The AccountValidator is responsible for:
//! - Short-circuiting empty input and non-account formats without a lookup
//! - Querying the ledger for everything else
//! - Folding every lookup failure into `AccountStatus::Invalid`

use crate::utils::account_format::offline_status;
use async_trait::async_trait;
use kanau::processor::Processor;
use std::convert::Infallible;
use tearpay_sdk::client::{LedgerClient, LedgerError};
use tearpay_sdk::objects::{AccountStatus, LedgerAccount};
use tracing::{debug, warn};

/// Source of account existence and balance.
///
/// Implemented by [`LedgerClient`] in production and by in-memory fakes in
/// tests.
#[async_trait]
pub trait LedgerLookup: Send + Sync {
    /// Look up `account_id` at final finality.
    async fn view_account(&self, account_id: &str) -> Result<LedgerAccount, LedgerError>;
}

#[async_trait]
impl LedgerLookup for LedgerClient {
    async fn view_account(&self, account_id: &str) -> Result<LedgerAccount, LedgerError> {
        LedgerClient::view_account(self, account_id).await
    }
}

/// Classifies recipient account identifiers.
pub struct AccountValidator<L> {
    lookup: L,
}

impl<L: LedgerLookup> AccountValidator<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Compute the status of `account_id`.
    ///
    /// Never fails: transport errors, malformed answers and unknown accounts
    /// all come back as [`AccountStatus::Invalid`].
    pub async fn classify(&self, account_id: &str) -> AccountStatus {
        if let Some(status) = offline_status(account_id) {
            debug!(account = %account_id, %status, "Classified account without lookup");
            return status;
        }

        match self.lookup.view_account(account_id).await {
            Ok(account) if account.has_balance() => AccountStatus::Valid,
            Ok(_) => AccountStatus::EmptyBalance,
            Err(LedgerError::AccountNotFound { message }) => {
                debug!(account = %account_id, %message, "Ledger rejected account");
                AccountStatus::Invalid
            }
            Err(e) => {
                warn!(account = %account_id, error = %e, "Ledger lookup failed");
                AccountStatus::Invalid
            }
        }
    }
}

impl<L: LedgerLookup> Processor<String> for AccountValidator<L> {
    type Output = AccountStatus;
    type Error = Infallible;

    async fn process(&self, account_id: String) -> Result<AccountStatus, Infallible> {
        Ok(self.classify(&account_id).await)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Scripted ledger: per-account answer and delay, plus a call log.
    #[derive(Clone, Default)]
    pub(crate) struct FakeLedger {
        answers: Arc<Mutex<HashMap<String, (Option<u128>, Duration)>>>,
        pub(crate) calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeLedger {
        /// `balance = None` answers with an unknown-account error.
        pub(crate) fn answer(&self, account: &str, balance: Option<u128>, delay: Duration) {
            self.answers
                .lock()
                .unwrap()
                .insert(account.to_string(), (balance, delay));
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LedgerLookup for FakeLedger {
        async fn view_account(&self, account_id: &str) -> Result<LedgerAccount, LedgerError> {
            self.calls.lock().unwrap().push(account_id.to_string());
            let answer = self.answers.lock().unwrap().get(account_id).copied();
            let Some((balance, delay)) = answer else {
                return Err(LedgerError::MalformedResponse("no scripted answer".to_string()));
            };
            tokio::time::sleep(delay).await;
            match balance {
                Some(amount) => Ok(LedgerAccount {
                    account_id: account_id.to_string(),
                    amount,
                }),
                None => Err(LedgerError::AccountNotFound {
                    message: "UNKNOWN_ACCOUNT".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_ledger_answers_map_to_statuses() {
        let ledger = FakeLedger::default();
        ledger.answer("rich.near", Some(500_000), Duration::ZERO);
        ledger.answer("empty.near", Some(0), Duration::ZERO);
        ledger.answer("ghost.near", None, Duration::ZERO);
        let validator = AccountValidator::new(ledger.clone());

        assert_eq!(validator.classify("rich.near").await, AccountStatus::Valid);
        assert_eq!(validator.classify("empty.near").await, AccountStatus::EmptyBalance);
        assert_eq!(validator.classify("ghost.near").await, AccountStatus::Invalid);
        // transport-style failure
        assert_eq!(validator.classify("unscripted.near").await, AccountStatus::Invalid);
        assert_eq!(ledger.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_non_account_formats_skip_lookup() {
        let ledger = FakeLedger::default();
        let validator = AccountValidator::new(ledger.clone());

        let implicit = "0123456789abcdef".repeat(4);
        let evm = format!("0x{}", "ab".repeat(20));
        assert_eq!(validator.classify(&implicit).await, AccountStatus::NonAccountFormat);
        assert_eq!(validator.classify(&evm).await, AccountStatus::NonAccountFormat);
        assert_eq!(validator.classify("  ").await, AccountStatus::Loading);
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_processor_impl() {
        let ledger = FakeLedger::default();
        ledger.answer("rich.near", Some(1), Duration::ZERO);
        let validator = AccountValidator::new(ledger);

        let status = validator.process("rich.near".to_string()).await;
        assert_eq!(status, Ok(AccountStatus::Valid));
    }
}
