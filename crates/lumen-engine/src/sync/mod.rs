//! Mutual exclusion for lazily built shared tables.
//!
//! [`Mutex`] keeps the platform's native lock in fixed, compile-time-checked
//! storage and exposes a two-phase lifecycle: a `const` infallible
//! [`Mutex::init`], then a fallible [`Mutex::finish_initialization`], then
//! [`Mutex::enter`] / [`Mutex::leave`] pairs, then [`Mutex::cleanup`].
//!
//! The native lock is selected per platform family:
//! - hosted targets: [`CondvarLock`] (blocks on a condition variable)
//! - `wasm32`: [`SpinLock`] (the main thread may not block)

mod lock;
mod mutex;

pub use lock::{CondvarLock, HostLock, LockError, RawLock, SpinLock};
pub use mutex::{Critical, MUTEX_STORAGE_BYTES, Mutex};
