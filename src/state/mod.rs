//! Persisted run state: notified crossings and label history.
//!
//! Both documents are loaded once at the start of a run, mutated in memory
//! and written back with an atomic replace. Concurrent runs are serialized
//! through [`RunLock`]; without it two invocations racing on the same files
//! would silently drop one writer's marks.

pub mod history;
pub mod idempotency;
pub mod lock;
pub mod store;

pub use history::{HistoryEntry, HistoryState, HistoryStore};
pub use idempotency::{IdempotencyStore, SentState};
pub use lock::{LockError, RunLock};
pub use store::{write_atomic, JsonFileStore, StateStore, StoreError};
