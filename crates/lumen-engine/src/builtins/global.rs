use state::InitCell;

use super::BuiltinRegistry;
use crate::error::EngineError;
use crate::sync::{HostLock, Mutex, RawLock};

/// A registry built on first use and published for lock-free reads.
///
/// Construction is serialized by the mutex; a failure to initialize the mutex
/// or to build the table leaves nothing published, so a later call retries.
pub struct LazyRegistry<L: RawLock = HostLock> {
    lock: Mutex<L>,
    cell: InitCell<BuiltinRegistry>,
}

pub(crate) static GLOBAL: LazyRegistry = LazyRegistry::new();

impl<L: RawLock> LazyRegistry<L> {
    pub const fn new() -> Self {
        Self { lock: Mutex::init(), cell: InitCell::new() }
    }

    pub fn get_or_build(&self) -> Result<&BuiltinRegistry, EngineError> {
        if let Some(registry) = self.cell.try_get() {
            return Ok(registry);
        }

        self.lock.finish_initialization()?;
        let _guard = self.lock.critical();
        if self.cell.try_get().is_none() {
            let registry = BuiltinRegistry::build()?;
            log::debug!("publishing builtin registry ({} overloads)", registry.len());
            self.cell.set(registry);
        }
        Ok(self.cell.get())
    }

    pub fn is_built(&self) -> bool {
        self.cell.try_get().is_some()
    }
}

impl<L: RawLock> Default for LazyRegistry<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::{LockError, SpinLock};
    use std::sync::Arc;

    struct Failing;

    impl RawLock for Failing {
        fn create() -> Result<Self, LockError> {
            Err(LockError { reason: "lock table exhausted" })
        }
        fn lock(&self) {}
        fn unlock(&self) {}
    }

    #[test]
    fn lock_failure_aborts_construction() {
        let lazy: LazyRegistry<Failing> = LazyRegistry::new();
        let err = lazy.get_or_build().unwrap_err();
        assert!(matches!(err, EngineError::LockInit(_)));
        assert!(!lazy.is_built());
    }

    #[test]
    fn concurrent_first_use_builds_once() {
        let lazy = Arc::new(LazyRegistry::<SpinLock>::new());
        let addrs: Vec<usize> = (0..4)
            .map(|_| {
                let lazy = Arc::clone(&lazy);
                std::thread::spawn(move || lazy.get_or_build().unwrap() as *const _ as usize)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|t| t.join().unwrap())
            .collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
        assert!(lazy.is_built());
    }

    #[test]
    fn global_registry_is_shared() {
        let a = BuiltinRegistry::global().unwrap();
        let b = BuiltinRegistry::global().unwrap();
        assert!(std::ptr::eq(a, b));
    }
}
