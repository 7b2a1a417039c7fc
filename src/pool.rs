//! Lock-free pool of reusable `String` scratch buffers.
//!
//! The pool is a fixed array of slots, each an [`AtomicPtr`] that is either
//! null (empty) or owns one boxed `String`. Checkout is a single `swap(null)`
//! per probed slot and check-in a `compare_exchange(null, ptr)`, so no caller
//! ever waits on another. When every slot is empty the caller allocates a
//! fresh buffer; when every slot is full on check-in the buffer is dropped.
//!
//! A checked-out buffer is owned exclusively by its [`PooledBuffer`] guard
//! and returns to the pool when the guard drops, on every exit path.

use std::ops::{Deref, DerefMut};
use std::ptr;
use std::sync::atomic::{AtomicPtr, AtomicU64, AtomicUsize, Ordering};

use serde::Serialize;

/// Counters describing how often buffers were reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Checkouts served from a slot.
    pub reused: u64,
    /// Checkouts that had to allocate.
    pub allocated: u64,
    /// Buffers currently parked in slots.
    pub idle: usize,
}

pub struct BufferPool {
    slots: Box<[AtomicPtr<String>]>,
    cursor: AtomicUsize,
    buffer_capacity: usize,
    max_retained_capacity: usize,
    reused: AtomicU64,
    allocated: AtomicU64,
}

impl BufferPool {
    /// Creates a pool with `slots` slots (at least one). Fresh buffers start
    /// with `buffer_capacity` bytes; buffers that grew past
    /// `max_retained_capacity` are not kept.
    pub fn new(slots: usize, buffer_capacity: usize, max_retained_capacity: usize) -> Self {
        let slots = (0..slots.max(1))
            .map(|_| AtomicPtr::new(ptr::null_mut()))
            .collect();
        Self {
            slots,
            cursor: AtomicUsize::new(0),
            buffer_capacity,
            max_retained_capacity: max_retained_capacity.max(buffer_capacity),
            reused: AtomicU64::new(0),
            allocated: AtomicU64::new(0),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Checks out an empty buffer.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let len = self.slots.len();
        let start = self.cursor.fetch_add(1, Ordering::Relaxed) % len;

        for offset in 0..len {
            let slot = &self.slots[(start + offset) % len];
            let raw = slot.swap(ptr::null_mut(), Ordering::Acquire);
            if !raw.is_null() {
                // SAFETY: non-null slot pointers always come from
                // `Box::into_raw` in `release`, and the swap above made this
                // caller their only owner.
                let buf = unsafe { Box::from_raw(raw) };
                self.reused.fetch_add(1, Ordering::Relaxed);
                return PooledBuffer {
                    pool: self,
                    buf: Some(buf),
                };
            }
        }

        tracing::trace!(slots = len, "buffer pool empty, allocating");
        self.allocated.fetch_add(1, Ordering::Relaxed);
        PooledBuffer {
            pool: self,
            buf: Some(Box::new(String::with_capacity(self.buffer_capacity))),
        }
    }

    fn release(&self, mut buf: Box<String>) {
        if buf.capacity() > self.max_retained_capacity {
            tracing::trace!(capacity = buf.capacity(), "dropping oversized buffer");
            return;
        }
        buf.clear();

        let raw = Box::into_raw(buf);
        let len = self.slots.len();
        let start = self.cursor.load(Ordering::Relaxed) % len;
        for offset in 0..len {
            let slot = &self.slots[(start + offset) % len];
            if slot
                .compare_exchange(ptr::null_mut(), raw, Ordering::Release, Ordering::Relaxed)
                .is_ok()
            {
                return;
            }
        }

        // SAFETY: no slot accepted `raw`, so ownership never left this function.
        drop(unsafe { Box::from_raw(raw) });
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            reused: self.reused.load(Ordering::Relaxed),
            allocated: self.allocated.load(Ordering::Relaxed),
            idle: self
                .slots
                .iter()
                .filter(|slot| !slot.load(Ordering::Relaxed).is_null())
                .count(),
        }
    }
}

impl Drop for BufferPool {
    fn drop(&mut self) {
        for slot in self.slots.iter_mut() {
            let raw = std::mem::replace(slot.get_mut(), ptr::null_mut());
            if !raw.is_null() {
                // SAFETY: `&mut self` rules out concurrent access and the
                // pointer came from `Box::into_raw`.
                drop(unsafe { Box::from_raw(raw) });
            }
        }
    }
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPool")
            .field("slots", &self.slots.len())
            .field("buffer_capacity", &self.buffer_capacity)
            .field("max_retained_capacity", &self.max_retained_capacity)
            .field("stats", &self.stats())
            .finish()
    }
}

/// Exclusive handle on a pooled buffer; derefs to `String`.
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buf: Option<Box<String>>,
}

impl Deref for PooledBuffer<'_> {
    type Target = String;

    fn deref(&self) -> &String {
        self.buf.as_deref().unwrap_or_else(|| unreachable!("buffer taken before drop"))
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut String {
        self.buf
            .as_deref_mut()
            .unwrap_or_else(|| unreachable!("buffer taken before drop"))
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.release(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_checkouts_reuse_one_buffer() {
        let pool = BufferPool::new(4, 32, 1024);
        for i in 0..10 {
            let mut buf = pool.acquire();
            assert!(buf.is_empty(), "buffer not cleared on iteration {i}");
            buf.push_str("một trăm");
        }
        let stats = pool.stats();
        assert_eq!(stats.allocated, 1);
        assert_eq!(stats.reused, 9);
        assert_eq!(stats.idle, 1);
    }

    #[test]
    fn concurrent_holders_get_distinct_buffers() {
        let pool = BufferPool::new(2, 16, 1024);
        let mut a = pool.acquire();
        let mut b = pool.acquire();
        a.push_str("a");
        b.push_str("b");
        assert_eq!(a.as_str(), "a");
        assert_eq!(b.as_str(), "b");
        drop(a);
        drop(b);
        assert_eq!(pool.stats().idle, 2);
    }

    #[test]
    fn overflow_buffers_are_dropped_when_slots_are_full() {
        let pool = BufferPool::new(1, 16, 1024);
        let a = pool.acquire();
        let b = pool.acquire();
        drop(a);
        drop(b);
        let stats = pool.stats();
        assert_eq!(stats.allocated, 2);
        assert_eq!(stats.idle, 1);
    }

    #[test]
    fn oversized_buffers_are_not_retained() {
        let pool = BufferPool::new(2, 8, 64);
        {
            let mut buf = pool.acquire();
            buf.push_str(&"x".repeat(1000));
        }
        assert_eq!(pool.stats().idle, 0);
    }

    #[test]
    fn zero_slots_is_clamped_to_one() {
        let pool = BufferPool::new(0, 8, 64);
        assert_eq!(pool.slot_count(), 1);
        drop(pool.acquire());
        assert_eq!(pool.stats().idle, 1);
    }

    #[test]
    fn many_threads_share_the_pool() {
        let pool = BufferPool::new(8, 32, 1024);
        std::thread::scope(|scope| {
            for t in 0..8 {
                let pool = &pool;
                scope.spawn(move || {
                    for i in 0..1000 {
                        let mut buf = pool.acquire();
                        assert!(buf.is_empty());
                        buf.push_str(&format!("{t}-{i}"));
                        assert_eq!(buf.as_str(), format!("{t}-{i}"));
                    }
                });
            }
        });
        let stats = pool.stats();
        assert_eq!(stats.reused + stats.allocated, 8000);
        assert!(stats.idle <= 8);
    }
}
