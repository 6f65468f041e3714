//! Processors of the form pipeline.
//!
//! - `AccountValidator`: classifies an account identifier into an `AccountStatus`
//! - `FormSession`: owns the form state, debounces recipient edits, discards
//!   stale validation results and runs the submit side effects

pub mod account_validator;
pub mod form_session;

pub use account_validator::{AccountValidator, LedgerLookup};
pub use form_session::{
    FormHandle, FormSession, FormState, FormView, SessionClosed, SubmitError, SubmitOutcome,
};
