//! FormSession processor.
//!
//! The FormSession is responsible for:
//! - Owning the form fields, the account status, the generated URL and the
//!   toast visibility, and publishing them as one `FormView` snapshot
//! - Debouncing recipient edits so one lookup is issued per pause in typing
//! - Tagging each lookup with a generation and discarding stale results
//! - Running the submit side effects: build the link, publish it, copy it,
//!   show the toast, reset the form
//!
//! Everything runs on a single task; lookups are spawned and report back
//! through a channel, so no state is shared behind locks.

use crate::clipboard::{Clipboard, ClipboardError};
use crate::config::SessionConfig;
use crate::events::{
    FormCommand, FormCommandReceiver, FormCommandSender, ValidationResolved,
    ValidationResolvedReceiver, ValidationResolvedSender, form_command_channel,
    validation_resolved_channel,
};
use crate::processors::account_validator::{AccountValidator, LedgerLookup};
use std::sync::Arc;
use tearpay_sdk::invoice_link::generate_invoice_id;
use tearpay_sdk::objects::{AccountStatus, Invoice, InvoiceAmount, InvoiceError};
use thiserror::Error;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Public data types
// ---------------------------------------------------------------------------

/// Raw text of the two form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub recipient_account: String,
    pub amount: String,
}

/// Snapshot of everything a front-end renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    pub form: FormState,
    pub status: AccountStatus,
    /// The most recently generated invoice link, kept across form resets.
    pub generated_url: Option<String>,
    pub toast_visible: bool,
}

impl FormView {
    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.status.allows_submit()
    }

    pub fn status_message(&self) -> &'static str {
        self.status.message()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.generated_url.is_some() {
            "Generate Another Invoice"
        } else {
            "Generate Invoice Link"
        }
    }
}

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub invoice: Invoice,
    pub url: String,
    /// Whether the link made it to the clipboard.
    pub copied: bool,
}

/// Errors that can occur when submitting the form.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The recipient is still being checked or does not exist.
    #[error("submission blocked, recipient status is {0}")]
    Blocked(AccountStatus),

    #[error(transparent)]
    MalformedAmount(InvoiceError),

    /// Holds the amount as typed.
    #[error("amount {0:?} is below the minimum of 0.01")]
    AmountTooSmall(String),

    #[error("form session closed")]
    SessionClosed,
}

impl From<InvoiceError> for SubmitError {
    fn from(e: InvoiceError) -> Self {
        match e {
            InvoiceError::BelowMinimum(raw) => SubmitError::AmountTooSmall(raw),
            e => SubmitError::MalformedAmount(e),
        }
    }
}

/// The session task is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("form session closed")]
pub struct SessionClosed;

// ---------------------------------------------------------------------------
// FormHandle
// ---------------------------------------------------------------------------

/// Front-end side of a running [`FormSession`].
#[derive(Debug, Clone)]
pub struct FormHandle {
    commands: FormCommandSender,
    view_rx: watch::Receiver<FormView>,
}

impl FormHandle {
    pub fn new(commands: FormCommandSender, view_rx: watch::Receiver<FormView>) -> Self {
        Self { commands, view_rx }
    }

    /// Report the new content of the recipient field.
    pub async fn edit_recipient(&self, text: impl Into<String>) -> Result<(), SessionClosed> {
        self.commands
            .send(FormCommand::RecipientEdited(text.into()))
            .await
            .map_err(|_| SessionClosed)
    }

    /// Report the new content of the amount field.
    pub async fn edit_amount(&self, text: impl Into<String>) -> Result<(), SessionClosed> {
        self.commands
            .send(FormCommand::AmountEdited(text.into()))
            .await
            .map_err(|_| SessionClosed)
    }

    /// Submit the form and wait for the side effects to finish.
    pub async fn submit(&self) -> Result<SubmitOutcome, SubmitError> {
        let (reply, reply_rx) = oneshot::channel();
        self.commands
            .send(FormCommand::Submit { reply })
            .await
            .map_err(|_| SubmitError::SessionClosed)?;
        reply_rx.await.map_err(|_| SubmitError::SessionClosed)?
    }

    /// Current snapshot.
    pub fn view(&self) -> FormView {
        self.view_rx.borrow().clone()
    }

    /// Receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<FormView> {
        self.view_rx.clone()
    }
}

// ---------------------------------------------------------------------------
// FormSession
// ---------------------------------------------------------------------------

/// Event loop owning one invoice form.
///
/// Signal receivers are injected when calling [`run()`](FormSession::run),
/// following the same pattern as the other processors.
pub struct FormSession<L> {
    validator: Arc<AccountValidator<L>>,
    clipboard: Arc<dyn Clipboard>,
    config: SessionConfig,
    view: FormView,
    /// Bumped on every recipient change; lookups carry the value they saw.
    generation: u64,
    settle_at: Option<Instant>,
    toast_until: Option<Instant>,
    view_tx: watch::Sender<FormView>,
    result_tx: ValidationResolvedSender,
    result_rx: ValidationResolvedReceiver,
}

impl<L: LedgerLookup + 'static> FormSession<L> {
    /// Create a new FormSession with an empty form.
    pub fn new(
        validator: Arc<AccountValidator<L>>,
        clipboard: Arc<dyn Clipboard>,
        config: SessionConfig,
    ) -> Self {
        let (view_tx, _) = watch::channel(FormView::default());
        let (result_tx, result_rx) = validation_resolved_channel();
        Self {
            validator,
            clipboard,
            config,
            view: FormView::default(),
            generation: 0,
            settle_at: None,
            toast_until: None,
            view_tx,
            result_tx,
            result_rx,
        }
    }

    /// Receiver for published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<FormView> {
        self.view_tx.subscribe()
    }

    /// Spawn the session on the current runtime and return its handle.
    pub fn spawn(self, shutdown_rx: watch::Receiver<bool>) -> (FormHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = form_command_channel();
        let handle = FormHandle::new(command_tx, self.subscribe());
        let task = tokio::spawn(self.run(shutdown_rx, command_rx));
        (handle, task)
    }

    /// Run the FormSession until shutdown is signaled or every handle is
    /// dropped.
    pub async fn run(
        mut self,
        mut shutdown_rx: watch::Receiver<bool>,
        mut command_rx: FormCommandReceiver,
    ) {
        info!("FormSession started");

        loop {
            let settle_at = self.settle_at.unwrap_or_else(Instant::now);
            let toast_until = self.toast_until.unwrap_or_else(Instant::now);

            tokio::select! {
                biased;

                // Check for shutdown
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("FormSession received shutdown signal");
                        break;
                    }
                }

                // Lookup results, stale ones are dropped in commit_validation
                Some(resolved) = self.result_rx.recv() => {
                    self.commit_validation(resolved);
                }

                // Debounce window elapsed
                _ = tokio::time::sleep_until(settle_at), if self.settle_at.is_some() => {
                    self.dispatch_validation();
                }

                // Toast window elapsed
                _ = tokio::time::sleep_until(toast_until), if self.toast_until.is_some() => {
                    self.hide_toast();
                }

                command = command_rx.recv() => {
                    let Some(command) = command else {
                        info!("FormCommand channel closed");
                        break;
                    };
                    self.handle_command(command).await;
                }
            }
        }

        info!("FormSession shutdown complete");
    }

    // -- Transitions --------------------------------------------------------

    async fn handle_command(&mut self, command: FormCommand) {
        match command {
            FormCommand::RecipientEdited(text) => self.edit_recipient(text),
            FormCommand::AmountEdited(text) => {
                self.view.form.amount = text;
                self.publish();
            }
            FormCommand::Submit { reply } => {
                let result = self.submit().await;
                if reply.send(result).is_err() {
                    debug!("Submit caller went away before the reply");
                }
            }
        }
    }

    /// Every edit supersedes in-flight lookups and restarts the debounce.
    fn edit_recipient(&mut self, text: String) {
        self.generation += 1;
        self.view.form.recipient_account = text;
        self.view.status = AccountStatus::Loading;
        self.settle_at = Some(Instant::now() + self.config.debounce);
        debug!(generation = self.generation, "Recipient edited, debounce restarted");
        self.publish();
    }

    fn dispatch_validation(&mut self) {
        self.settle_at = None;
        let generation = self.generation;
        let account = self.view.form.recipient_account.clone();
        let validator = Arc::clone(&self.validator);
        let result_tx = self.result_tx.clone();

        debug!(generation, account = %account, "Recipient settled, dispatching validation");

        tokio::spawn(async move {
            let status = validator.classify(&account).await;
            let resolved = ValidationResolved {
                generation,
                account,
                status,
            };
            // The session may already be gone; nothing left to update then.
            let _ = result_tx.send(resolved).await;
        });
    }

    fn commit_validation(&mut self, resolved: ValidationResolved) {
        if resolved.generation != self.generation {
            debug!(
                generation = resolved.generation,
                current = self.generation,
                account = %resolved.account,
                "Discarding stale validation result"
            );
            return;
        }
        debug!(
            generation = resolved.generation,
            account = %resolved.account,
            status = %resolved.status,
            "Validation committed"
        );
        self.view.status = resolved.status;
        self.publish();
    }

    async fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let status = self.view.status;
        if !status.allows_submit() {
            return Err(SubmitError::Blocked(status));
        }
        let amount_usd = InvoiceAmount::parse_payable(&self.view.form.amount)?;

        let invoice = Invoice {
            invoice_id: generate_invoice_id(),
            amount_usd,
            recipient_address: self.view.form.recipient_account.clone(),
        };
        let url = invoice.to_url(&self.config.invoice_service.base_url);
        info!(
            invoice_id = %invoice.invoice_id,
            amount_usd = %invoice.amount_usd,
            recipient = %invoice.recipient_address,
            "Invoice generated"
        );

        self.view.generated_url = Some(url.clone());
        self.publish();

        // A hung backend must not stall the loop; the reset below always runs.
        let timeout = self.config.clipboard_timeout;
        let write = match tokio::time::timeout(timeout, self.clipboard.write_text(&url)).await {
            Ok(result) => result,
            Err(_) => Err(ClipboardError::TimedOut(timeout)),
        };
        let copied = match write {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to copy invoice link to clipboard");
                false
            }
        };
        if copied {
            self.view.toast_visible = true;
            self.toast_until = Some(Instant::now() + self.config.toast_duration);
        }

        self.reset_form();

        Ok(SubmitOutcome {
            invoice,
            url,
            copied,
        })
    }

    /// Clear both fields. The empty recipient needs no lookup, so the status
    /// goes straight to `Loading` and any in-flight lookup becomes stale.
    fn reset_form(&mut self) {
        self.generation += 1;
        self.settle_at = None;
        self.view.form = FormState::default();
        self.view.status = AccountStatus::Loading;
        self.publish();
    }

    fn hide_toast(&mut self) {
        self.toast_until = None;
        self.view.toast_visible = false;
        self.publish();
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::NoClipboard;
    use crate::processors::account_validator::tests::FakeLedger;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use tearpay_sdk::config::InvoiceServiceConfig;
    use tearpay_sdk::invoice_link::is_invoice_id;
    use tokio::time::sleep;
    use url::Url;

    #[derive(Default)]
    struct RecordingClipboard {
        texts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Clipboard for RecordingClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            self.texts.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    /// Backend that never finishes a write.
    struct HungClipboard;

    #[async_trait]
    impl Clipboard for HungClipboard {
        async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            std::future::pending().await
        }
    }

    fn config() -> SessionConfig {
        SessionConfig::new(InvoiceServiceConfig::new(
            Url::parse("https://tearpay-demo.intear.tech").unwrap(),
        ))
    }

    fn start(
        ledger: &FakeLedger,
        clipboard: Arc<dyn Clipboard>,
    ) -> (FormHandle, watch::Sender<bool>) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let validator = Arc::new(AccountValidator::new(ledger.clone()));
        let session = FormSession::new(validator, clipboard, config());
        let (handle, _task) = session.spawn(shutdown_rx);
        (handle, shutdown_tx)
    }

    /// Type `account`, wait for the debounce and the lookup to finish.
    async fn settle(handle: &FormHandle, account: &str) {
        handle.edit_recipient(account).await.unwrap();
        sleep(Duration::from_millis(600)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_recipient_blocks_submit() {
        let ledger = FakeLedger::default();
        let (handle, _shutdown) = start(&ledger, Arc::new(RecordingClipboard::default()));

        settle(&handle, "").await;
        handle.edit_amount("10").await.unwrap();

        let view = handle.view();
        assert_eq!(view.status, AccountStatus::Loading);
        assert!(!view.can_submit());
        assert!(matches!(
            handle.submit().await,
            Err(SubmitError::Blocked(AccountStatus::Loading))
        ));
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_within_window_issue_one_lookup() {
        let ledger = FakeLedger::default();
        ledger.answer("example.near", Some(500_000), Duration::ZERO);
        let (handle, _shutdown) = start(&ledger, Arc::new(NoClipboard));

        for partial in ["e", "ex", "exam", "example.ne", "example.near"] {
            handle.edit_recipient(partial).await.unwrap();
            sleep(Duration::from_millis(100)).await;
        }
        // 100ms after the last edit: still waiting
        assert!(ledger.calls().is_empty());
        assert_eq!(handle.view().status, AccountStatus::Loading);

        sleep(Duration::from_millis(300)).await;
        assert!(ledger.calls().is_empty());

        sleep(Duration::from_millis(200)).await;
        assert_eq!(ledger.calls(), vec!["example.near".to_string()]);
        assert_eq!(handle.view().status, AccountStatus::Valid);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_never_overwrites_newer_status() {
        let ledger = FakeLedger::default();
        ledger.answer("slow.near", Some(0), Duration::from_secs(2));
        ledger.answer("fast.near", Some(42), Duration::from_millis(50));
        let (handle, _shutdown) = start(&ledger, Arc::new(NoClipboard));

        // A is in flight when B is typed; B resolves first.
        settle(&handle, "slow.near").await;
        settle(&handle, "fast.near").await;
        assert_eq!(handle.view().status, AccountStatus::Valid);

        // A resolves afterwards and must be ignored.
        sleep(Duration::from_secs(3)).await;
        assert_eq!(ledger.calls(), vec!["slow.near".to_string(), "fast.near".to_string()]);
        assert_eq!(handle.view().status, AccountStatus::Valid);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_result_discarded_after_edit() {
        let ledger = FakeLedger::default();
        ledger.answer("rich.near", Some(1), Duration::from_secs(1));
        let (handle, _shutdown) = start(&ledger, Arc::new(NoClipboard));

        settle(&handle, "rich.near").await;
        // lookup still pending; the user keeps editing
        handle.edit_recipient("rich.nea").await.unwrap();
        assert_eq!(handle.view().status, AccountStatus::Loading);

        // "rich.nea" is unknown to the ledger and resolves first, then the
        // older "rich.near" answer arrives and must not win.
        sleep(Duration::from_secs(1)).await;
        assert_eq!(ledger.calls(), vec!["rich.near".to_string(), "rich.nea".to_string()]);
        assert_eq!(handle.view().status, AccountStatus::Invalid);
        assert_eq!(handle.view().form.recipient_account, "rich.nea");
    }

    #[tokio::test(start_paused = true)]
    async fn test_statuses_and_gating() {
        let ledger = FakeLedger::default();
        ledger.answer("empty.near", Some(0), Duration::ZERO);
        ledger.answer("ghost.near", None, Duration::ZERO);
        let (handle, _shutdown) = start(&ledger, Arc::new(NoClipboard));

        settle(&handle, "empty.near").await;
        assert_eq!(handle.view().status, AccountStatus::EmptyBalance);
        assert!(handle.view().can_submit());

        settle(&handle, "ghost.near").await;
        assert_eq!(handle.view().status, AccountStatus::Invalid);
        assert!(!handle.view().can_submit());

        settle(&handle, &"f".repeat(64)).await;
        assert_eq!(handle.view().status, AccountStatus::NonAccountFormat);
        assert!(handle.view().can_submit());
        assert_eq!(ledger.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_copies_link_and_shows_toast() {
        let ledger = FakeLedger::default();
        ledger.answer("example.near", Some(500_000), Duration::ZERO);
        let clipboard = Arc::new(RecordingClipboard::default());
        let (handle, _shutdown) = start(&ledger, clipboard.clone());
        assert_eq!(handle.view().submit_label(), "Generate Invoice Link");

        settle(&handle, "example.near").await;
        handle.edit_amount("10").await.unwrap();
        let outcome = handle.submit().await.unwrap();

        assert!(outcome.copied);
        assert!(is_invoice_id(&outcome.invoice.invoice_id));
        assert_eq!(
            outcome.url,
            format!(
                "https://tearpay-demo.intear.tech/?amountUsd=10.00&invoiceId={}&recipientAddress=example.near",
                outcome.invoice.invoice_id
            )
        );
        assert_eq!(clipboard.texts.lock().unwrap().clone(), vec![outcome.url.clone()]);

        let view = handle.view();
        assert_eq!(view.generated_url.as_deref(), Some(outcome.url.as_str()));
        assert!(view.toast_visible);
        assert_eq!(view.form, FormState::default());
        assert_eq!(view.status, AccountStatus::Loading);
        assert_eq!(view.submit_label(), "Generate Another Invoice");

        sleep(Duration::from_millis(2900)).await;
        assert!(handle.view().toast_visible);
        sleep(Duration::from_millis(200)).await;
        assert!(!handle.view().toast_visible);
        assert!(handle.view().generated_url.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clipboard_failure_still_resets_form() {
        let ledger = FakeLedger::default();
        ledger.answer("empty.near", Some(0), Duration::ZERO);
        let (handle, _shutdown) = start(&ledger, Arc::new(NoClipboard));

        settle(&handle, "empty.near").await;
        handle.edit_amount("0.5").await.unwrap();
        let outcome = handle.submit().await.unwrap();

        assert!(!outcome.copied);
        assert_eq!(outcome.invoice.amount_usd.to_string(), "0.50");
        let view = handle.view();
        assert!(!view.toast_visible);
        assert_eq!(view.generated_url, Some(outcome.url));
        assert_eq!(view.form, FormState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_clipboard_does_not_stall_session() {
        let ledger = FakeLedger::default();
        ledger.answer("example.near", Some(1), Duration::ZERO);
        ledger.answer("next.near", Some(0), Duration::ZERO);
        let (handle, _shutdown) = start(&ledger, Arc::new(HungClipboard));

        settle(&handle, "example.near").await;
        handle.edit_amount("10").await.unwrap();
        let started = Instant::now();
        let outcome = handle.submit().await.unwrap();

        assert!(!outcome.copied);
        let waited = started.elapsed();
        assert!(waited >= crate::config::DEFAULT_CLIPBOARD_TIMEOUT, "{waited:?}");
        assert!(waited < crate::config::DEFAULT_CLIPBOARD_TIMEOUT + Duration::from_millis(100));
        let view = handle.view();
        assert!(!view.toast_visible);
        assert_eq!(view.generated_url, Some(outcome.url));
        assert_eq!(view.form, FormState::default());

        // the loop keeps serving edits and lookups afterwards
        settle(&handle, "next.near").await;
        assert_eq!(handle.view().status, AccountStatus::EmptyBalance);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_rejects_bad_amounts() {
        let ledger = FakeLedger::default();
        ledger.answer("example.near", Some(7), Duration::ZERO);
        let (handle, _shutdown) = start(&ledger, Arc::new(RecordingClipboard::default()));
        settle(&handle, "example.near").await;

        handle.edit_amount("lots").await.unwrap();
        assert!(matches!(
            handle.submit().await,
            Err(SubmitError::MalformedAmount(_))
        ));

        handle.edit_amount("0").await.unwrap();
        assert!(matches!(
            handle.submit().await,
            Err(SubmitError::AmountTooSmall(_))
        ));

        // would round up to 0.01, but the typed value is below the minimum
        handle.edit_amount("0.005").await.unwrap();
        assert!(matches!(
            handle.submit().await,
            Err(SubmitError::AmountTooSmall(raw)) if raw == "0.005"
        ));

        // rejected submits leave the form alone
        let view = handle.view();
        assert_eq!(view.form.recipient_account, "example.near");
        assert_eq!(view.status, AccountStatus::Valid);
        assert!(view.generated_url.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_closes_session() {
        let ledger = FakeLedger::default();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let validator = Arc::new(AccountValidator::new(ledger));
        let session = FormSession::new(validator, Arc::new(NoClipboard), config());
        let (handle, task) = session.spawn(shutdown_rx);

        shutdown_tx.send(true).unwrap();
        task.await.unwrap();
        assert_eq!(handle.edit_amount("1").await, Err(SessionClosed));
        assert!(matches!(handle.submit().await, Err(SubmitError::SessionClosed)));
    }
}
