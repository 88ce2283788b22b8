pub mod dry_run;
pub mod iface;
pub mod rpc;

use std::sync::Arc;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentLevel;

pub use dry_run::DryRunSubmitter;
pub use iface::Submitter;
pub use rpc::RpcSubmitter;

/// Returns the submitter for this run.
/// When dry_run=true: transactions are built and signed but only logged
/// When dry_run=false: sent over JSON-RPC with preflight simulation
pub fn default(
    rpc_client: Arc<RpcClient>,
    commitment: CommitmentLevel,
    dry_run: bool,
) -> Arc<dyn Submitter> {
    if dry_run {
        Arc::new(DryRunSubmitter)
    } else {
        Arc::new(RpcSubmitter::new(rpc_client, commitment))
    }
}
