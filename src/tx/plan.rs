use std::fmt;

use crate::rpc::{MintInfo, TokenAccount};

/// What gets done to a single token account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CleanupPlan {
    CloseOnly,
    /// Burn the full balance, then close.
    BurnAndClose { amount: u64, decimals: u8 },
}

/// Why an account is left alone. These are policy outcomes, not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    FrozenMint,
    HasBalance(u64),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FrozenMint => write!(f, "mint has a freeze authority"),
            SkipReason::HasBalance(amount) => write!(f, "still holds {amount} tokens"),
        }
    }
}

/// Decide what to do with `account`.
///
/// A freezable mint is always skipped. A non-empty account is only touched
/// when `force_burn` is set; an empty one is closed either way.
pub fn plan_for(
    account: &TokenAccount,
    mint: &MintInfo,
    force_burn: bool,
) -> Result<CleanupPlan, SkipReason> {
    if mint.is_freezable() {
        return Err(SkipReason::FrozenMint);
    }

    match (account.amount, force_burn) {
        (0, _) => Ok(CleanupPlan::CloseOnly),
        (amount, true) => Ok(CleanupPlan::BurnAndClose {
            amount,
            decimals: mint.decimals,
        }),
        (amount, false) => Err(SkipReason::HasBalance(amount)),
    }
}
