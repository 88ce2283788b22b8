//! Sequential walk over every wallet's token accounts, closing (or
//! burning and closing) the ones that qualify.

use std::{fmt, sync::Arc, time::Duration};

use anyhow::Result;
use log::{error, info, warn};
use solana_sdk::{
    commitment_config::CommitmentLevel,
    signature::{Keypair, Signature, Signer},
};

use crate::{
    rpc::{ChainReader, TokenAccount},
    submit::Submitter,
    tx::{build_instructions, build_signed_tx, plan_for, SkipReason},
};

/// Per-run counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub wallets: usize,
    pub accounts_seen: usize,
    pub submitted: usize,
    /// Built and signed but not sent (dry run).
    pub prepared: usize,
    pub skipped_frozen: usize,
    pub skipped_non_empty: usize,
    pub failed: usize,
}

impl fmt::Display for CleanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} wallet(s), {} account(s): {} sent, {} prepared, {} frozen, {} non-empty, {} failed",
            self.wallets,
            self.accounts_seen,
            self.submitted,
            self.prepared,
            self.skipped_frozen,
            self.skipped_non_empty,
            self.failed
        )
    }
}

enum Outcome {
    Sent(Signature),
    Prepared(Signature),
    Skipped(SkipReason),
}

pub struct Cleaner {
    reader: Arc<dyn ChainReader>,
    submitter: Arc<dyn Submitter>,
    wallets: Arc<Vec<Keypair>>,
    commitment: CommitmentLevel,
    /// Pause after each submitted transaction.
    delay: Duration,
}

impl Cleaner {
    pub fn new(
        reader: Arc<dyn ChainReader>,
        submitter: Arc<dyn Submitter>,
        wallets: Arc<Vec<Keypair>>,
        commitment: CommitmentLevel,
    ) -> Self {
        Self {
            reader,
            submitter,
            wallets,
            commitment,
            delay: Duration::from_millis(100),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Run one pass over every wallet.
    ///
    /// Failures on a single account are logged and counted; only a failure to
    /// list a wallet's accounts is returned.
    pub async fn clean(&self, force_burn: bool) -> Result<CleanReport> {
        info!("🧹 [CLEAN] Running {}clean", if force_burn { "full " } else { "" });
        let mut report = CleanReport::default();

        for wallet in self.wallets.iter() {
            let owner = wallet.pubkey();
            info!("👛 [CLEAN] Cleaning token accounts for wallet: {owner}");

            let accounts = self.reader.token_accounts(&owner, self.commitment).await?;
            info!("📦 [CLEAN] Got {} accounts for wallet: {owner}", accounts.len());
            report.wallets += 1;

            for account in &accounts {
                report.accounts_seen += 1;
                match self.process_account(wallet, account, force_burn).await {
                    Ok(Outcome::Sent(sig)) => {
                        report.submitted += 1;
                        info!(
                            "✅ [CLEAN] Sent transaction {sig} for account {}",
                            account.address
                        );
                        if !self.delay.is_zero() {
                            tokio::time::sleep(self.delay).await;
                        }
                    }
                    Ok(Outcome::Prepared(sig)) => {
                        report.prepared += 1;
                        info!(
                            "📝 [CLEAN] Prepared transaction {sig} for account {} (not sent)",
                            account.address
                        );
                    }
                    Ok(Outcome::Skipped(reason)) => {
                        match reason {
                            SkipReason::FrozenMint => report.skipped_frozen += 1,
                            SkipReason::HasBalance(_) => report.skipped_non_empty += 1,
                        }
                        warn!("⚠️ [CLEAN] {} {reason}, skipping", account.mint);
                    }
                    Err(e) => {
                        report.failed += 1;
                        error!(
                            "❌ [CLEAN] Error processing account {}: {e:#}",
                            account.address
                        );
                    }
                }
            }
        }

        info!("🏁 [CLEAN] Clean completed: {report}");
        Ok(report)
    }

    async fn process_account(
        &self,
        wallet: &Keypair,
        account: &TokenAccount,
        force_burn: bool,
    ) -> Result<Outcome> {
        let mint = self.reader.mint(&account.mint, self.commitment).await?;

        let plan = match plan_for(account, &mint, force_burn) {
            Ok(plan) => plan,
            Err(reason) => return Ok(Outcome::Skipped(reason)),
        };

        let owner = wallet.pubkey();
        let ixs = build_instructions(&plan, account, &owner)?;
        let blockhash = self.reader.latest_blockhash().await?;
        let tx = build_signed_tx(wallet, &ixs, blockhash)?;

        let sig = self.submitter.submit(&tx).await?;
        if self.submitter.broadcasts() {
            Ok(Outcome::Sent(sig))
        } else {
            Ok(Outcome::Prepared(sig))
        }
    }
}
