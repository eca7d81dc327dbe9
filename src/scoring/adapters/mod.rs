//! Adapter implementations of the scoring ports.

pub mod memory;
