use serde::{Deserialize, Serialize};

/// Validation outcome for a recipient account identifier.
///
/// Exactly one value holds for the recipient field at any time. `Loading`
/// covers both "empty input" and "lookup still in flight".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Loading,
    Valid,
    Invalid,
    EmptyBalance,
    /// A raw public key or a foreign-chain address rather than a named account.
    NonAccountFormat,
}

impl AccountStatus {
    /// Whether an invoice may be generated for an account in this state.
    ///
    /// `EmptyBalance` and `NonAccountFormat` only produce a warning.
    pub fn allows_submit(self) -> bool {
        !matches!(self, AccountStatus::Loading | AccountStatus::Invalid)
    }

    /// Whether the status should be shown as a warning next to the field.
    pub fn is_warning(self) -> bool {
        matches!(
            self,
            AccountStatus::EmptyBalance | AccountStatus::NonAccountFormat
        )
    }

    /// Human readable hint for the recipient field.
    pub fn message(self) -> &'static str {
        match self {
            AccountStatus::Loading => "Checking account...",
            AccountStatus::Valid => "Account found",
            AccountStatus::Invalid => "Account does not exist",
            AccountStatus::EmptyBalance => {
                "This account has no balance, make sure it can receive USDC"
            }
            AccountStatus::NonAccountFormat => {
                "This looks like a raw address, it may not be able to receive USDC directly"
            }
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AccountStatus::Loading => "loading",
            AccountStatus::Valid => "valid",
            AccountStatus::Invalid => "invalid",
            AccountStatus::EmptyBalance => "empty_balance",
            AccountStatus::NonAccountFormat => "non_account_format",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_gating() {
        assert!(!AccountStatus::Loading.allows_submit());
        assert!(!AccountStatus::Invalid.allows_submit());
        assert!(AccountStatus::Valid.allows_submit());
        assert!(AccountStatus::EmptyBalance.allows_submit());
        assert!(AccountStatus::NonAccountFormat.allows_submit());
    }

    #[test]
    fn test_warnings_keep_distinct_messages() {
        assert!(AccountStatus::EmptyBalance.is_warning());
        assert!(AccountStatus::NonAccountFormat.is_warning());
        assert!(!AccountStatus::Valid.is_warning());
        assert_ne!(
            AccountStatus::EmptyBalance.message(),
            AccountStatus::NonAccountFormat.message()
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&AccountStatus::NonAccountFormat).unwrap();
        assert_eq!(json, "\"non_account_format\"");
        assert_eq!(AccountStatus::EmptyBalance.to_string(), "empty_balance");
    }
}
