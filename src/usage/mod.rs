//! Usage-quota subsystem
//!
//! This module provides daily quota enforcement for gated requests:
//! - Per-user usage records with lazy day-rollover reset
//! - Tiered limit checks (free / premium)
//! - Atomic post-success usage accounting

pub mod ledger;
pub mod policy;
pub mod store;
pub mod types;

pub use ledger::UsageLedger;
pub use policy::{QuotaDecision, QuotaPolicy};
pub use store::UsageStore;
pub use types::UserUsage;
