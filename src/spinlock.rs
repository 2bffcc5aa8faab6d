// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
On the wasm main thread, we can't necessarily block on a lock.

Instead we use a spinlock.  Hold times must be kept as short as possible;
the only consumer is the global logger registry, which holds it just long
enough to clone or swap a vector of `Arc`s.
*/

use std::cell::UnsafeCell;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

const UNLOCKED: u8 = 0;
//values 1..=254 count readers; 255 is the exclusive writer
const LOCKED_WRITE: u8 = u8::MAX;

pub struct Spinlock<T> {
    data: UnsafeCell<T>,
    state: AtomicU8,
}

unsafe impl<T: Send> Send for Spinlock<T> {}
unsafe impl<T: Send> Sync for Spinlock<T> {}

impl<T> Spinlock<T> {
    pub fn new(data: T) -> Self {
        Spinlock {
            data: UnsafeCell::new(data),
            state: AtomicU8::new(UNLOCKED),
        }
    }

    fn lock_exclusive(&self) {
        while self
            .state
            .compare_exchange_weak(UNLOCKED, LOCKED_WRITE, Acquire, Relaxed)
            .is_err()
        {
            std::hint::spin_loop();
        }
    }

    fn unlock_exclusive(&self) {
        self.state.store(UNLOCKED, Release);
    }

    fn lock_shared(&self) {
        while self
            .state
            .fetch_update(Acquire, Relaxed, |v| {
                if v < (LOCKED_WRITE - 1) {
                    Some(v + 1)
                } else {
                    None
                }
            })
            .is_err()
        {
            std::hint::spin_loop();
        }
    }

    fn unlock_shared(&self) {
        self.state.fetch_sub(1, Release);
    }

    /// Runs `f` with exclusive access to the protected value.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.lock_exclusive();

        // SAFETY: the exclusive lock is held, so no other reference exists
        let result = unsafe { f(&mut *self.data.get()) };

        self.unlock_exclusive();
        result
    }

    /// Runs `f` with shared access to the protected value.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.lock_shared();

        // SAFETY: a shared lock is held, so no exclusive reference exists
        let result = unsafe { f(&*self.data.get()) };

        self.unlock_shared();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::Spinlock;
    use std::sync::Arc;

    #[test]
    fn exclusive_and_shared_access() {
        let lock = Spinlock::new(vec![1u32, 2, 3]);
        lock.with_mut(|v| v.push(4));
        let len = lock.with(|v| v.len());
        assert_eq!(len, 4);
    }

    #[test]
    fn contended_writes() {
        let lock = Arc::new(Spinlock::new(0u64));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let lock = lock.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    lock.with_mut(|v| *v += 1);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(lock.with(|v| *v), 4000);
    }
}
