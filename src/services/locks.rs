//! Per-key async locks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OwnedMutexGuard;

type KeyLock = Arc<tokio::sync::Mutex<()>>;

/// A map of async mutexes keyed by id. Entries are dropped once unused.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<i64, KeyLock>>,
}

/// Holds the lock for one key until dropped.
pub struct KeyedGuard<'a> {
    owner: &'a KeyedLocks,
    key: i64,
    lock: KeyLock,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    pub async fn lock(&self, key: i64) -> KeyedGuard<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            prune_abandoned(&mut locks);
            locks.entry(key).or_default().clone()
        };
        let guard = lock.clone().lock_owned().await;
        KeyedGuard {
            owner: self,
            key,
            lock,
            guard: Some(guard),
        }
    }

    /// Number of keys currently tracked.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Drop for KeyedGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        let mut locks = self
            .owner
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Only the map and this guard still reference the lock: nobody is waiting.
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.key);
        }
        prune_abandoned(&mut locks);
    }
}

/// Drop entries referenced only by the map. A waiter whose future was dropped
/// after being handed the lock leaves one behind.
fn prune_abandoned(locks: &mut HashMap<i64, KeyLock>) {
    locks.retain(|_, lock| Arc::strong_count(lock) > 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_entries_removed_after_use() {
        let locks = KeyedLocks::new();
        {
            let _guard = locks.lock(1).await;
            assert_eq!(locks.len(), 1);
        }
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let locks = Arc::new(KeyedLocks::new());
        let guard = locks.lock(7).await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock(7).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        waiter.await.unwrap();
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_waiter_does_not_leak_entry() {
        let locks = Arc::new(KeyedLocks::new());
        let guard = locks.lock(7).await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock(7).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Release while the waiter is queued, then cancel it before it runs again
        drop(guard);
        waiter.abort();
        assert!(waiter.await.unwrap_err().is_cancelled());
        assert_eq!(locks.len(), 1);

        drop(locks.lock(8).await);
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = KeyedLocks::new();
        let _a = locks.lock(1).await;
        let _b = locks.lock(2).await;
        assert_eq!(locks.len(), 2);
    }
}
