//! Performance scoring and leaderboard aggregation.
//!
//! Completing a reviewed task awards difficulty-based points to its
//! assignee; the leaderboard is recomputed on demand from the append-only
//! point log.
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
