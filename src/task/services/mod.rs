//! Application services for task lifecycle orchestration.

mod ledger;
mod lifecycle;

pub use ledger::{AuditLedger, LedgerError};
pub use lifecycle::{LifecycleError, LifecycleResult, TaskLifecycleService};
