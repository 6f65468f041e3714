//! Configuration types for TearPay invoices.
//!
//! These types represent the validated runtime configuration shared across
//! crates. The actual config loading/parsing is handled by the CLI crate.

mod invoice;
mod ledger;

pub use invoice::{DEFAULT_INVOICE_SERVICE_URL, InvoiceServiceConfig};
pub use ledger::{DEFAULT_LEDGER_RPC_URL, LedgerConfig};
