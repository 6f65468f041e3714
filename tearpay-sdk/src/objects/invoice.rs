//! Invoice values.
//!
//! An [`Invoice`] only ever exists in memory: its materialised form is the
//! shareable URL produced by [`crate::invoice_link`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use url::Url;

/// Errors produced while turning form input into an invoice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvoiceError {
    #[error("amount is not a number: {0:?}")]
    MalformedAmount(String),

    #[error("amount {0:?} is below the minimum of 0.01")]
    BelowMinimum(String),
}

/// Smallest amount an invoice may request (one cent).
pub fn min_invoice_amount() -> Decimal {
    Decimal::new(1, 2)
}

/// A USD amount rounded to exactly two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InvoiceAmount(Decimal);

impl InvoiceAmount {
    /// Parse the raw text of the amount field.
    ///
    /// Accepts surrounding whitespace, plain decimals and scientific
    /// notation. Midpoints round away from zero.
    pub fn parse(raw: &str) -> Result<Self, InvoiceError> {
        Self::round(raw, parse_number(raw)?)
    }

    /// Like [`parse`](Self::parse), but the typed value itself must reach
    /// [`min_invoice_amount`]. `0.005` is rejected even though it would
    /// round up to `0.01`.
    pub fn parse_payable(raw: &str) -> Result<Self, InvoiceError> {
        let value = parse_number(raw)?;
        if value < min_invoice_amount() {
            return Err(InvoiceError::BelowMinimum(raw.to_owned()));
        }
        Self::round(raw, value)
    }

    fn round(raw: &str, value: Decimal) -> Result<Self, InvoiceError> {
        let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        // rescale gives up silently when 28 digits are already in use
        if rounded.scale() != 2 {
            return Err(InvoiceError::MalformedAmount(raw.to_owned()));
        }
        Ok(Self(rounded))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

fn parse_number(raw: &str) -> Result<Decimal, InvoiceError> {
    let text = raw.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| InvoiceError::MalformedAmount(raw.to_owned()))
}

impl std::fmt::Display for InvoiceAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A generated invoice. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub invoice_id: String,
    pub amount_usd: InvoiceAmount,
    pub recipient_address: String,
}

impl Invoice {
    /// Render the shareable link on top of the invoice service base URL.
    ///
    /// Query values are interpolated as-is: account identifiers and
    /// two-decimal amounts never contain reserved characters.
    pub fn to_url(&self, base: &Url) -> String {
        let mut url = base.as_str().to_owned();
        if !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(&format!(
            "?amountUsd={}&invoiceId={}&recipientAddress={}",
            self.amount_usd, self.invoice_id, self.recipient_address
        ));
        url
    }
}
