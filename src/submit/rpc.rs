//! Plain JSON-RPC `sendTransaction` submitter with preflight simulation on.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_sdk::{
    commitment_config::CommitmentLevel, signature::Signature, transaction::VersionedTransaction,
};

use crate::submit::iface::Submitter;

#[derive(Clone)]
pub struct RpcSubmitter {
    rpc: Arc<RpcClient>,
    preflight_commitment: CommitmentLevel,
}

impl RpcSubmitter {
    pub fn new(rpc: Arc<RpcClient>, preflight_commitment: CommitmentLevel) -> Self {
        Self {
            rpc,
            preflight_commitment,
        }
    }

    fn send_config(&self) -> RpcSendTransactionConfig {
        RpcSendTransactionConfig {
            skip_preflight: false,
            preflight_commitment: Some(self.preflight_commitment),
            ..RpcSendTransactionConfig::default()
        }
    }
}

#[async_trait]
impl Submitter for RpcSubmitter {
    async fn submit(&self, tx: &VersionedTransaction) -> Result<Signature> {
        let start_time = Instant::now();

        let sig = self
            .rpc
            .send_transaction_with_config(tx, self.send_config())
            .await
            .context("sendTransaction")?;

        debug!(
            "[SUBMIT] {} accepted in {}ms",
            sig,
            start_time.elapsed().as_millis()
        );
        Ok(sig)
    }
}
