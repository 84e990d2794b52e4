use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, PoisonError};

/// Failure to construct a native lock.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("native lock construction failed: {reason}")]
pub struct LockError {
    pub reason: &'static str,
}

/// The single capability a platform lock backend provides.
///
/// `lock` / `unlock` are not re-entrant: a thread must not lock twice without
/// unlocking in between.
pub trait RawLock: Sized + Send + Sync {
    /// Builds the native object. May allocate, and may fail.
    fn create() -> Result<Self, LockError>;
    fn lock(&self);
    fn unlock(&self);
}

#[cfg(not(target_arch = "wasm32"))]
pub type HostLock = CondvarLock;

#[cfg(target_arch = "wasm32")]
pub type HostLock = SpinLock;

// ── CondvarLock ───────────────────────────────────────────────────────────

/// Blocking lock built from a `held` flag and a condition variable.
///
/// Unlike `std::sync::Mutex`, acquisition and release are separate calls with
/// no guard object, which is what the enter/leave lifecycle needs.
#[derive(Debug, Default)]
pub struct CondvarLock {
    held: std::sync::Mutex<bool>,
    released: Condvar,
}

impl RawLock for CondvarLock {
    fn create() -> Result<Self, LockError> {
        Ok(Self::default())
    }

    fn lock(&self) {
        // The flag is a plain bool; a panic elsewhere cannot leave it torn.
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        while *held {
            held = self.released.wait(held).unwrap_or_else(PoisonError::into_inner);
        }
        *held = true;
    }

    fn unlock(&self) {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        *held = false;
        drop(held);
        self.released.notify_one();
    }
}

// ── SpinLock ──────────────────────────────────────────────────────────────

/// Busy-waiting lock for targets where the calling thread must not park.
#[derive(Debug, Default)]
pub struct SpinLock {
    held: AtomicBool,
}

impl RawLock for SpinLock {
    fn create() -> Result<Self, LockError> {
        Ok(Self::default())
    }

    fn lock(&self) {
        while self
            .held
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.held.load(Ordering::Relaxed) {
                std::hint::spin_loop();
            }
        }
    }

    fn unlock(&self) {
        self.held.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn hammer<L: RawLock + 'static>() {
        struct Shared<L> {
            lock: L,
            counter: std::cell::UnsafeCell<u64>,
        }
        // SAFETY: `counter` is only touched while `lock` is held.
        unsafe impl<L: Sync> Sync for Shared<L> {}

        let shared = Arc::new(Shared { lock: L::create().unwrap(), counter: 0.into() });
        let threads: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        shared.lock.lock();
                        // SAFETY: exclusive while locked.
                        unsafe { *shared.counter.get() += 1 };
                        shared.lock.unlock();
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        // SAFETY: all threads joined.
        assert_eq!(unsafe { *shared.counter.get() }, 4_000);
    }

    #[test]
    fn condvar_lock_excludes() {
        hammer::<CondvarLock>();
    }

    #[test]
    fn spin_lock_excludes() {
        hammer::<SpinLock>();
    }
}
