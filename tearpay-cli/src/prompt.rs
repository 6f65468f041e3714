//! Line-oriented front-end for the invoice form.
//!
//! Each stdin line is one command. Field edits are forwarded to the
//! [`FormSession`](tearpay_core::processors::FormSession) exactly as a text
//! input would report them; status changes are printed as they are
//! published.

use kanau::processor::Processor;
use tearpay_core::processors::{AccountValidator, FormHandle, FormView, LedgerLookup, SubmitError};
use tearpay_sdk::objects::AccountStatus;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::shutdown::shutdown_signal;

pub const HELP: &str = "\
Commands:
  to <account>      set the recipient account (e.g. example.near)
  amount <usdc>     set the amount in USDC (e.g. 10.00)
  submit            generate the invoice link and copy it
  status            show the current form
  check <account>   look up an account without touching the form
  help              show this help
  quit              exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Recipient(String),
    Amount(String),
    Submit,
    Status,
    Check(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

impl Command {
    /// Parse a line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let command = match word.to_ascii_lowercase().as_str() {
            // an empty recipient is a valid edit (clearing the field)
            "to" | "recipient" => Command::Recipient(rest.to_string()),
            "amount" => Command::Amount(rest.to_string()),
            "submit" | "generate" => Command::Submit,
            "status" => Command::Status,
            "check" if rest.is_empty() => return Err(ParseError::MissingArgument("check")),
            "check" => Command::Check(rest.to_string()),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(ParseError::Unknown(word.to_string())),
        };
        Ok(Some(command))
    }
}

/// Render the form the way the page lays it out.
pub fn render_view(view: &FormView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Recipient Account: {}\n",
        display_or_placeholder(&view.form.recipient_account, "example.near")
    ));
    if !view.form.recipient_account.trim().is_empty() {
        let marker = if view.status.is_warning() { "warning" } else { "status" };
        out.push_str(&format!("  {marker}: {}\n", view.status_message()));
    }
    out.push_str(&format!(
        "Amount (USDC):     {}\n",
        display_or_placeholder(&view.form.amount, "10.00")
    ));
    let state = if view.can_submit() { "enabled" } else { "disabled" };
    out.push_str(&format!("[{}] ({state})", view.submit_label()));
    if let Some(url) = &view.generated_url {
        out.push_str(&format!("\nLast invoice: {url}"));
    }
    out
}

fn display_or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

/// Print status changes and toast notifications as the session publishes them.
pub fn spawn_view_printer(
    mut view_rx: watch::Receiver<FormView>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last = view_rx.borrow_and_update().clone();
        loop {
            tokio::select! {
                biased;

                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }

                changed = view_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let view = view_rx.borrow_and_update().clone();
                    let settled = !view.form.recipient_account.trim().is_empty()
                        && view.form.recipient_account == last.form.recipient_account;
                    if settled && view.status != last.status && view.status != AccountStatus::Loading {
                        println!("{}: {}", view.form.recipient_account, view.status_message());
                    }
                    if view.toast_visible && !last.toast_visible {
                        println!("Invoice link copied successfully!");
                    }
                    last = view;
                }
            }
        }
    })
}

/// Read commands from stdin until `quit`, end of input or a shutdown signal.
pub async fn run_prompt<L: LedgerLookup + 'static>(
    handle: &FormHandle,
    validator: &AccountValidator<L>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            _ = &mut shutdown => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            tracing::debug!("Reached end of input");
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Recipient(account) => handle.edit_recipient(account).await?,
            Command::Amount(amount) => handle.edit_amount(amount).await?,
            Command::Submit => match handle.submit().await {
                Ok(outcome) => {
                    println!("{}", outcome.url);
                    if !outcome.copied {
                        println!("(could not copy to clipboard, copy the link above)");
                    }
                }
                Err(SubmitError::SessionClosed) => {
                    anyhow::bail!("form session stopped unexpectedly");
                }
                Err(e) => println!("Cannot generate invoice: {e}"),
            },
            Command::Status => println!("{}", render_view(&handle.view())),
            Command::Check(account) => {
                let Ok(status) = validator.process(account.clone()).await;
                println!("{account}: {status} ({})", status.message());
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}
