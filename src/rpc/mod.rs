//! Read side of the cluster: token accounts, mints and blockhashes.

pub mod client;

use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::{commitment_config::CommitmentLevel, hash::Hash, pubkey::Pubkey};

pub use client::RpcChainReader;

/// One SPL token account held by a wallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenAccount {
    pub address: Pubkey,
    pub mint: Pubkey,
    /// Raw base-unit balance.
    pub amount: u64,
}

/// The parts of a mint the cleaner cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintInfo {
    pub decimals: u8,
    pub freeze_authority: Option<Pubkey>,
}

impl MintInfo {
    pub fn is_freezable(&self) -> bool {
        self.freeze_authority.is_some()
    }
}

#[async_trait]
pub trait ChainReader: Send + Sync + 'static {
    /// Every token account owned by `owner`, in the order the node returns them.
    async fn token_accounts(
        &self,
        owner: &Pubkey,
        commitment: CommitmentLevel,
    ) -> Result<Vec<TokenAccount>>;

    async fn mint(&self, mint: &Pubkey, commitment: CommitmentLevel) -> Result<MintInfo>;

    /// Latest blockhash at `finalized` commitment.
    async fn latest_blockhash(&self) -> Result<Hash>;
}
