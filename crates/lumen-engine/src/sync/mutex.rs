use std::cell::UnsafeCell;
use std::marker::PhantomData;
use std::mem::{MaybeUninit, align_of, size_of};
use std::sync::atomic::{AtomicU8, Ordering};

use super::lock::{HostLock, LockError, RawLock};

/// Bytes reserved for the native lock object on every platform.
pub const MUTEX_STORAGE_BYTES: usize = 64;

#[repr(C, align(16))]
struct Storage([MaybeUninit<u8>; MUTEX_STORAGE_BYTES]);

const UNINIT: u8 = 0;
const BUSY: u8 = 1;
const READY: u8 = 2;

/// Mutual-exclusion object with the native lock constructed in place.
///
/// Lifecycle:
/// 1. [`Mutex::init`]: `const`, never fails; usable in a `static`.
/// 2. [`Mutex::finish_initialization`]: builds the native lock; may fail.
/// 3. [`Mutex::enter`] / [`Mutex::leave`] pairs, or the [`Mutex::critical`] guard.
/// 4. [`Mutex::cleanup`]: releases the native lock (also run on drop).
pub struct Mutex<L: RawLock = HostLock> {
    storage: UnsafeCell<Storage>,
    phase: AtomicU8,
    _native: PhantomData<L>,
}

// SAFETY: the storage is written only by the single thread that wins the
// UNINIT → BUSY transition and is shared read-only (`&L`, which is `Sync`)
// after READY is published with release ordering.
unsafe impl<L: RawLock> Sync for Mutex<L> {}
unsafe impl<L: RawLock> Send for Mutex<L> {}

impl<L: RawLock> Mutex<L> {
    /// Evaluated on first use of `finish_initialization`; a native lock that
    /// does not fit the reserved storage fails the build.
    const FITS: () = assert!(
        size_of::<L>() <= MUTEX_STORAGE_BYTES && align_of::<L>() <= align_of::<Storage>(),
        "native lock does not fit in MUTEX_STORAGE_BYTES"
    );

    pub const fn init() -> Self {
        Self {
            storage: UnsafeCell::new(Storage([MaybeUninit::uninit(); MUTEX_STORAGE_BYTES])),
            phase: AtomicU8::new(UNINIT),
            _native: PhantomData,
        }
    }

    /// Constructs the native lock.
    ///
    /// Idempotent once it has succeeded. Concurrent callers wait for the thread
    /// doing the construction. On failure the object stays uninitialized and a
    /// later call retries.
    pub fn finish_initialization(&self) -> Result<(), LockError> {
        let () = Self::FITS;
        loop {
            match self.phase.compare_exchange(UNINIT, BUSY, Ordering::Acquire, Ordering::Acquire) {
                Ok(_) => {
                    return match L::create() {
                        Ok(native) => {
                            // SAFETY: BUSY grants this thread exclusive access to
                            // the storage; FITS guarantees size and alignment.
                            unsafe { self.storage.get().cast::<L>().write(native) };
                            self.phase.store(READY, Ordering::Release);
                            Ok(())
                        }
                        Err(e) => {
                            self.phase.store(UNINIT, Ordering::Release);
                            Err(e)
                        }
                    };
                }
                Err(READY) => return Ok(()),
                Err(_) => std::thread::yield_now(),
            }
        }
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.phase.load(Ordering::Acquire) == READY
    }

    /// Enters the critical section.
    ///
    /// # Panics
    /// Panics if `finish_initialization` has not succeeded.
    pub fn enter(&self) {
        self.native().lock();
    }

    /// Leaves the critical section entered by this thread.
    ///
    /// # Panics
    /// Panics if `finish_initialization` has not succeeded.
    pub fn leave(&self) {
        self.native().unlock();
    }

    /// Enters and returns a guard that leaves on drop, including during unwinding.
    pub fn critical(&self) -> Critical<'_, L> {
        self.enter();
        Critical { mutex: self }
    }

    /// Releases the native lock. Further `enter` calls panic until the object
    /// is initialized again.
    pub fn cleanup(&mut self) {
        if *self.phase.get_mut() == READY {
            // SAFETY: READY means a valid `L` lives in the storage, and `&mut self`
            // rules out concurrent enter/leave.
            unsafe { self.storage.get_mut().0.as_mut_ptr().cast::<L>().drop_in_place() };
            *self.phase.get_mut() = UNINIT;
        }
    }

    fn native(&self) -> &L {
        assert!(self.is_initialized(), "mutex used before finish_initialization succeeded");
        // SAFETY: READY was observed with acquire ordering, so the write of the
        // native lock is visible and it stays alive until `cleanup(&mut self)`.
        unsafe { &*self.storage.get().cast::<L>() }
    }
}

impl<L: RawLock> Default for Mutex<L> {
    fn default() -> Self {
        Self::init()
    }
}

impl<L: RawLock> Drop for Mutex<L> {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Scope guard returned by [`Mutex::critical`].
pub struct Critical<'m, L: RawLock> {
    mutex: &'m Mutex<L>,
}

impl<L: RawLock> Drop for Critical<'_, L> {
    fn drop(&mut self) {
        self.mutex.leave();
    }
}
