pub mod account;
pub mod invoice;
pub mod ledger;

pub use account::AccountStatus;
pub use invoice::{Invoice, InvoiceAmount, InvoiceError, min_invoice_amount};
pub use ledger::{LedgerAccount, RpcRequest, RpcResponse, ViewAccountParams, ViewAccountResult};
