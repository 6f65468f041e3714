//! Event type definitions for the form session.

use crate::processors::form_session::{SubmitError, SubmitOutcome};
use tearpay_sdk::objects::AccountStatus;
use tokio::sync::oneshot;

/// Reply slot for a submit request.
pub type SubmitReply = oneshot::Sender<Result<SubmitOutcome, SubmitError>>;

/// Input coming from the front-end.
#[derive(Debug)]
pub enum FormCommand {
    /// The recipient field changed. Restarts the debounce window.
    RecipientEdited(String),
    /// The amount field changed.
    AmountEdited(String),
    /// Generate an invoice from the current form.
    Submit { reply: SubmitReply },
}

/// Outcome of one validation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResolved {
    /// Generation of the recipient value this request was issued for.
    pub generation: u64,
    /// The account string at dispatch time.
    pub account: String,
    pub status: AccountStatus,
}
