//! Deterministic random number generation
//!
//! Uses xorshift64* for fast, seedable draws.
//! CRITICAL: All randomness owned by the colony core MUST go through this module.

mod xorshift;

pub use xorshift::RngManager;
