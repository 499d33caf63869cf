//! tap-storage: persistence and mutual exclusion for the pool document
//!
//! Two seams, both with in-memory fakes for tests:
//! - `StateStore`: full-document read / atomic-replace write
//! - `LockPrimitive`: cross-process mutual exclusion with an RAII guard

pub mod lock;
pub mod store;

pub use lock::{LockError, LockPrimitive, MarkerLock, MemoryLock};
pub use store::{FileStore, MemoryStore, StateStore, StoreError};
