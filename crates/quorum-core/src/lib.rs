//! Quorum Core - Core types for the Quorum decision aggregation engine
//!
//! This crate provides the fundamental types used across the Quorum
//! ecosystem:
//! - Value types for runtime data
//! - The coercion rules (truthiness, numeric reading) that decision
//!   strategies apply to resolved basis values

pub mod types;

// Re-export commonly used types
pub use types::Value;
