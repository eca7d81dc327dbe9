//! Mention resolution and notification fanout.
//!
//! This module turns lifecycle events and comment mentions into per-user
//! notification records and delivers them through an injected push
//! transport. Persistence always happens before push; push failures are
//! logged and suppressed.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
