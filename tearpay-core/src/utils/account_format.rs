use tearpay_sdk::objects::AccountStatus;

/// Classify an account identifier without touching the network.
///
/// Returns `Some(status)` when the text alone decides the outcome (empty
/// input, raw public keys, EVM addresses) and `None` when the ledger has to
/// be asked.
pub fn offline_status(account_id: &str) -> Option<AccountStatus> {
    let trimmed = account_id.trim();
    if trimmed.is_empty() {
        return Some(AccountStatus::Loading);
    }
    if is_implicit_account(account_id) || is_evm_address(account_id) {
        return Some(AccountStatus::NonAccountFormat);
    }
    None
}

/// 64 lowercase hex characters: a raw ed25519 public key.
pub fn is_implicit_account(account_id: &str) -> bool {
    account_id.len() == 64 && is_lower_hex(account_id)
}

/// `0x` followed by 40 lowercase hex characters.
pub fn is_evm_address(account_id: &str) -> bool {
    account_id
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && is_lower_hex(hex))
}

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
