//! Shared building blocks for TearPay invoices.
//!
//! - [`objects`]: account statuses, invoice values and the ledger wire format
//! - [`invoice_link`]: invoice id generation and invoice URL assembly
//! - [`config`]: runtime configuration shared by the core and the CLI
//! - `client`: the ledger JSON-RPC client (behind the `client` feature)

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod invoice_link;
pub mod objects;
