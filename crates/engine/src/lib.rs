//! tap-engine: the pool manager runtime
//!
//! Combines the state store and lock primitive from `tap-storage` with the
//! pure pool model from `tap-core` into the claim/release/status operations
//! test runners call.

pub mod manager;

pub use manager::{ClaimError, PoolManager, PoolStatus, SetupError};
