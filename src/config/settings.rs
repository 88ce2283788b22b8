//! Runtime configuration loader.

use std::{env, fmt, path::PathBuf, str::FromStr, sync::Arc, time::Duration};

use anyhow::{anyhow, Context, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};

pub const RPC_ENDPOINT_VAR: &str = "RPC_ENDPOINT";
pub const COMMITMENT_VAR: &str = "COMMITMENT";
pub const PRIVATES_FILE_VAR: &str = "PRIVATES_FILE";
pub const CLEAN_DELAY_MS_VAR: &str = "CLEAN_DELAY_MS";

pub const DEFAULT_PRIVATES_FILE: &str = "privates.txt";
pub const DEFAULT_CLEAN_DELAY_MS: u64 = 100;

/// ------------------------------------------------------------------
/// Main Settings object
/// ------------------------------------------------------------------
pub struct Settings {
    /* -------- infrastructure ------------------------ */
    pub rpc_url: String,
    pub commitment: CommitmentLevel,

    /* -------- wallets ------------------------------- */
    pub privates_file: PathBuf,

    /* -------- pacing -------------------------------- */
    pub delay: Duration,

    /* -------- shared objects ------------------------ */
    pub rpc_client: Arc<RpcClient>,
}

impl Settings {
    /// --------------------------------------------------------------
    /// Read settings from the process environment.
    /// --------------------------------------------------------------
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// --------------------------------------------------------------
    /// Build settings from any key/value lookup. `from_env` is the
    /// production entry point; tests feed a map instead.
    /// --------------------------------------------------------------
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_url = lookup(RPC_ENDPOINT_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("{RPC_ENDPOINT_VAR} is not set"))?;
        if !(rpc_url.starts_with("http://") || rpc_url.starts_with("https://")) {
            return Err(anyhow!(
                "{RPC_ENDPOINT_VAR} must be an http(s) URL, got `{rpc_url}`"
            ));
        }

        let commitment_raw = lookup(COMMITMENT_VAR)
            .ok_or_else(|| anyhow!("{COMMITMENT_VAR} is not set"))?;
        let commitment = parse_commitment(&commitment_raw)?;

        let privates_file = lookup(PRIVATES_FILE_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PRIVATES_FILE));

        let delay_ms = match lookup(CLEAN_DELAY_MS_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("parsing {CLEAN_DELAY_MS_VAR}=`{raw}`"))?,
            None => DEFAULT_CLEAN_DELAY_MS,
        };

        let rpc_client = Arc::new(RpcClient::new_with_commitment(
            rpc_url.clone(),
            CommitmentConfig { commitment },
        ));

        Ok(Self {
            rpc_url,
            commitment,
            privates_file,
            delay: Duration::from_millis(delay_ms),
            rpc_client,
        })
    }
}

/// Only the three finality levels are accepted; the deprecated aliases
/// (`max`, `recent`, `root`, ...) that `CommitmentLevel::from_str` still
/// knows about are rejected.
pub fn parse_commitment(raw: &str) -> Result<CommitmentLevel> {
    let value = raw.trim().to_ascii_lowercase();
    match value.as_str() {
        "processed" | "confirmed" | "finalized" => CommitmentLevel::from_str(&value)
            .map_err(|e| anyhow!("invalid {COMMITMENT_VAR} `{raw}`: {e}")),
        _ => Err(anyhow!(
            "invalid {COMMITMENT_VAR} `{raw}` (expected processed, confirmed or finalized)"
        )),
    }
}

/* ------------------------------------------------------------------ */
/*  Manual Clone & Debug implementations (RpcClient isn’t Clone/Debug) */
/* ------------------------------------------------------------------ */
impl Clone for Settings {
    fn clone(&self) -> Self {
        Self {
            rpc_url: self.rpc_url.clone(),
            commitment: self.commitment,
            privates_file: self.privates_file.clone(),
            delay: self.delay,
            rpc_client: Arc::clone(&self.rpc_client),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("rpc_url", &self.rpc_url)
            .field("commitment", &self.commitment)
            .field("privates_file", &self.privates_file)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}
