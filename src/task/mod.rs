//! Task lifecycle management.
//!
//! This module implements the task status state machine and its
//! authorisation rules, the append-only transaction ledger every transition
//! writes to, and the comment surface that feeds mention fanout. The module
//! follows hexagonal architecture:
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
