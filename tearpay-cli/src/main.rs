//! TearPay Invoices
//!
//! Generate shareable USDC invoice links for ledger accounts from the terminal.

mod clipboard;
mod config;
mod prompt;
mod shutdown;

use clap::Parser;
use config::ConfigLoader;
use std::path::PathBuf;
use std::sync::Arc;
use tearpay_core::processors::{AccountValidator, FormSession};
use tearpay_sdk::client::LedgerClient;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// TearPay Invoices - accept any cryptocurrency, receive USDC
#[derive(Parser, Debug)]
#[command(name = "tearpay")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./tearpay.toml")]
    config: PathBuf,

    /// Override the ledger JSON-RPC endpoint
    #[arg(long, env = "TEARPAY_RPC_URL")]
    rpc_url: Option<Url>,

    /// Override the invoice service base URL
    #[arg(long)]
    invoice_url: Option<Url>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting tearpay v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = ConfigLoader::new(&args.config, args.rpc_url, args.invoice_url);
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!(
        rpc_url = %loaded_config.ledger.rpc_url,
        invoice_service = %loaded_config.session.invoice_service.base_url,
        "Configuration loaded"
    );

    let ledger = LedgerClient::from_config(&loaded_config.ledger);
    let validator = Arc::new(AccountValidator::new(ledger));
    let clipboard = clipboard::from_config(
        loaded_config.clipboard_command.as_deref(),
        loaded_config.session.clipboard_timeout,
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Start the form session and the status printer
    let session = FormSession::new(validator.clone(), clipboard, loaded_config.session);
    let (handle, session_task) = session.spawn(shutdown_rx.clone());
    let printer_task = prompt::spawn_view_printer(handle.subscribe(), shutdown_rx);

    println!("TearPay Invoices - accept any cryptocurrency, receive USDC");
    println!("{}", prompt::HELP);

    let result = prompt::run_prompt(&handle, validator.as_ref()).await;

    // Stop background tasks
    let _ = shutdown_tx.send(true);
    let _ = session_task.await;
    let _ = printer_task.await;
    tracing::info!("tearpay shutdown complete");

    result
}

/// Initialize the tracing subscriber with environment-based filtering.
///
/// Logs go to stderr so stdout only carries the prompt output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tearpay_core=info,tearpay=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
