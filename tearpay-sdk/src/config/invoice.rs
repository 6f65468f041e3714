//! Invoice service configuration.

use url::Url;

/// Invoice page that renders generated links.
pub const DEFAULT_INVOICE_SERVICE_URL: &str = "https://tearpay-demo.intear.tech";

/// Base URL every invoice link is built on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceServiceConfig {
    pub base_url: Url,
}

impl InvoiceServiceConfig {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }
}
