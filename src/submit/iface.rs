use async_trait::async_trait;
use solana_sdk::{signature::Signature, transaction::VersionedTransaction};

#[async_trait]
pub trait Submitter: Send + Sync + 'static {
    /// Send a signed transaction and return its signature.
    async fn submit(&self, tx: &VersionedTransaction) -> anyhow::Result<Signature>;

    /// False when `submit` only pretends, so callers neither pace nor count a send.
    fn broadcasts(&self) -> bool {
        true
    }
}
