//! Submitter that never touches the network.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use solana_sdk::{signature::Signature, transaction::VersionedTransaction};

use crate::submit::iface::Submitter;

#[derive(Clone, Copy, Debug, Default)]
pub struct DryRunSubmitter;

#[async_trait]
impl Submitter for DryRunSubmitter {
    async fn submit(&self, tx: &VersionedTransaction) -> Result<Signature> {
        let sig = tx
            .signatures
            .first()
            .copied()
            .ok_or_else(|| anyhow!("transaction carries no signature"))?;

        debug!(
            "[DRY-RUN] would send {} ({} instruction(s))",
            sig,
            tx.message.instructions().len()
        );
        Ok(sig)
    }

    fn broadcasts(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{
        hash::Hash,
        message::{v0, VersionedMessage},
        signature::{Keypair, Signer},
        system_instruction,
    };

    #[tokio::test]
    async fn returns_the_local_signature() {
        let payer = Keypair::new();
        let ix = system_instruction::transfer(&payer.pubkey(), &payer.pubkey(), 1);
        let msg = v0::Message::try_compile(&payer.pubkey(), &[ix], &[], Hash::default()).unwrap();
        let tx = VersionedTransaction::try_new(VersionedMessage::V0(msg), &[&payer]).unwrap();

        let sig = DryRunSubmitter.submit(&tx).await.unwrap();
        assert_eq!(sig, tx.signatures[0]);
        assert!(!DryRunSubmitter.broadcasts());
    }
}
