//! Invoice identifiers and shareable invoice links.
//!
//! The link format understood by the invoice service is:
//!
//! ```text
//! https://{host}/?amountUsd={amount:.2}&invoiceId=inv-{16 chars}&recipientAddress={account}
//! ```
//!
//! Invoice ids carry 96 bits of randomness: 12 random bytes encode to
//! exactly 16 characters of URL-safe, unpadded base64.

use rand::Rng;
use url::Url;

use crate::objects::{Invoice, InvoiceAmount, InvoiceError};

/// Prefix of every invoice id.
pub const INVOICE_ID_PREFIX: &str = "inv-";

/// Number of random bytes drawn per invoice id.
pub const INVOICE_ID_BYTES: usize = 12;

/// Number of encoded characters following [`INVOICE_ID_PREFIX`].
pub const INVOICE_ID_CHARS: usize = 16;

// ---------------------------------------------------------------------------
// Invoice ids
// ---------------------------------------------------------------------------

/// Generate a fresh `inv-` prefixed invoice id.
pub fn generate_invoice_id() -> String {
    let mut bytes = [0u8; INVOICE_ID_BYTES];
    rand::rng().fill(&mut bytes);
    let encoded = fast32::base64::RFC4648_URL_NOPAD.encode(&bytes);
    let token: String = encoded.chars().take(INVOICE_ID_CHARS).collect();
    format!("{INVOICE_ID_PREFIX}{token}")
}

/// Check that `id` has the shape produced by [`generate_invoice_id`].
pub fn is_invoice_id(id: &str) -> bool {
    let Some(token) = id.strip_prefix(INVOICE_ID_PREFIX) else {
        return false;
    };
    token.len() == INVOICE_ID_CHARS
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

// ---------------------------------------------------------------------------
// Invoice links
// ---------------------------------------------------------------------------

/// Create an invoice with a fresh id for `amount` payable to `recipient`.
pub fn new_invoice(amount: &str, recipient: &str) -> Result<Invoice, InvoiceError> {
    let amount_usd = InvoiceAmount::parse(amount)?;
    Ok(Invoice {
        invoice_id: generate_invoice_id(),
        amount_usd,
        recipient_address: recipient.to_owned(),
    })
}

/// Build the shareable invoice URL for `amount` and `recipient`.
///
/// Callers are expected to enforce a positive amount beforehand; only
/// numeric formattability is checked here.
pub fn build_invoice_url(
    base: &Url,
    amount: &str,
    recipient: &str,
) -> Result<String, InvoiceError> {
    let invoice = new_invoice(amount, recipient)?;
    Ok(invoice.to_url(base))
}
