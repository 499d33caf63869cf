//! tap-core: Core library for the tap test-account pool
//!
//! This crate provides:
//! - Pure pool state transitions (claim / restore / reset)
//! - Partition planning for sharded runs
//! - Configuration for lock and claim retry budgets
//!
//! Nothing in this crate touches the filesystem; persistence and mutual
//! exclusion live in `tap-storage`.

pub mod config;
pub mod partition;
pub mod pool;

// Re-exports
pub use config::{ClaimSettings, LeaseMode, LockSettings, PoolConfig};
pub use partition::{plan, plan_one, Partition, PartitionError};
pub use pool::{HolderId, PoolError, PoolState, Restored, ShardInfo};
