//! Helpers for composing and signing cleanup transactions.

use anyhow::{Context, Result};
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::{v0, VersionedMessage},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::VersionedTransaction,
};
use spl_token::instruction::{burn_checked, close_account};

use crate::rpc::TokenAccount;
use crate::tx::CleanupPlan;

/// Instructions for `plan`, with `owner` as authority and rent destination.
pub fn build_instructions(
    plan: &CleanupPlan,
    account: &TokenAccount,
    owner: &Pubkey,
) -> Result<Vec<Instruction>> {
    let mut ixs = Vec::with_capacity(2);

    if let CleanupPlan::BurnAndClose { amount, decimals } = *plan {
        ixs.push(
            burn_checked(
                &spl_token::id(),
                &account.address,
                &account.mint,
                owner,
                &[],
                amount,
                decimals,
            )
            .context("building burn_checked instruction")?,
        );
    }

    ixs.push(
        close_account(&spl_token::id(), &account.address, owner, owner, &[])
            .context("building close_account instruction")?,
    );

    Ok(ixs)
}

/// Compile `instructions` into a v0 message paid by `payer` and sign it.
pub fn build_signed_tx(
    payer: &Keypair,
    instructions: &[Instruction],
    blockhash: Hash,
) -> Result<VersionedTransaction> {
    let msg = v0::Message::try_compile(&payer.pubkey(), instructions, &[], blockhash)
        .context("compiling v0 message")?;
    VersionedTransaction::try_new(VersionedMessage::V0(msg), &[payer])
        .context("signing transaction")
}
