//! Per-account cleanup plans and the transactions built from them.

pub mod plan;
pub mod wrapper;

pub use plan::{plan_for, CleanupPlan, SkipReason};
pub use wrapper::{build_instructions, build_signed_tx};
