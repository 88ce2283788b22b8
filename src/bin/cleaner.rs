//! Close empty token accounts across every wallet in the secrets file.
//!
//! Usage: cargo run --bin cleaner -- [--force-burn] [--dry-run]

use std::{path::PathBuf, sync::Arc, time::Duration};

use account_cleaner::{
    config::Settings,
    rpc::RpcChainReader,
    submit,
    utils::logging::init_logging,
    wallet::load_wallets,
    Cleaner,
};
use anyhow::Result;
use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(name = "cleaner", about = "Close (or burn and close) SPL token accounts")]
struct Args {
    /// Burn any remaining balance before closing non-empty accounts
    #[arg(long)]
    force_burn: bool,

    /// Build and sign transactions without sending them
    #[arg(long)]
    dry_run: bool,

    /// Secrets file, one base58 key per line (overrides PRIVATES_FILE)
    #[arg(long)]
    privates: Option<PathBuf>,

    /// Pause after each sent transaction (overrides CLEAN_DELAY_MS)
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging("info");

    let args = Args::parse();
    let settings = Settings::from_env()?;

    let privates = args
        .privates
        .clone()
        .unwrap_or_else(|| settings.privates_file.clone());
    let wallets = Arc::new(load_wallets(&privates)?);
    info!("🔑 Loaded {} wallet(s) from {:?}", wallets.len(), privates);

    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or(settings.delay);

    let reader = Arc::new(RpcChainReader::new(Arc::clone(&settings.rpc_client)));
    let submitter = submit::default(
        Arc::clone(&settings.rpc_client),
        settings.commitment,
        args.dry_run,
    );

    let cleaner = Cleaner::new(reader, submitter, wallets, settings.commitment).with_delay(delay);
    cleaner.clean(args.force_burn).await?;

    Ok(())
}
