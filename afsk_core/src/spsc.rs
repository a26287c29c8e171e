//! Lock-free single-producer single-consumer byte ring buffer.
//!
//! A `const`-generic, allocation-free ring buffer: the modem's RX/TX byte
//! FIFOs are embedded directly in the modem state and must not touch the
//! heap. Storage is `[UnsafeCell<MaybeUninit<u8>>; N]` rather than a
//! heap-allocated boxed slice, and the handle is a single `&self`-based
//! struct rather than split `Producer`/`Consumer` owners, since the same
//! struct is poked at from both an ISR and a foreground task.

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicUsize, Ordering};

/// A fixed-capacity, lock-free SPSC byte ring buffer.
///
/// `N` must be a power of two; [`Fifo::new`] panics otherwise (this is a
/// `const fn`, so with a literal `N` the panic resolves at compile time via
/// promotion to a `const` evaluation).
///
/// Producer and consumer may run concurrently from different execution
/// contexts (an ISR and a foreground task) as long as there really is only
/// one of each — this type enforces the atomics but not the single-writer /
/// single-reader discipline itself.
pub struct Fifo<const N: usize> {
    ring: [UnsafeCell<MaybeUninit<u8>>; N],
    head: AtomicUsize,
    tail: AtomicUsize,
}

// SAFETY: access to `ring` is only ever through the atomically-gated
// try_push/try_pop below, which never hand out overlapping live references.
unsafe impl<const N: usize> Sync for Fifo<N> {}

impl<const N: usize> Fifo<N> {
    const MASK: usize = N - 1;

    /// Creates an empty FIFO.
    ///
    /// # Panics
    ///
    /// Panics if `N` is zero or not a power of two.
    #[inline]
    pub const fn new() -> Self {
        assert!(N > 0 && N.is_power_of_two(), "Fifo capacity must be a nonzero power of two");
        Self {
            // SAFETY: an array of MaybeUninit<UnsafeCell<_>> needs no initialization.
            ring: unsafe { MaybeUninit::uninit().assume_init() },
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Attempts to push a byte. Returns `Err(byte)` if the FIFO is full.
    ///
    /// Lock-free: safe to call from ISR context with no critical section,
    /// as long as the platform's `usize` loads/stores are atomic on their
    /// own (true for any 16-bit-or-wider target).
    #[inline]
    pub fn try_push(&self, byte: u8) -> Result<(), u8> {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);

        if head.wrapping_sub(tail) >= N {
            return Err(byte);
        }

        let index = head & Self::MASK;
        // SAFETY: only the producer writes this slot, and we just verified
        // the consumer has not claimed it yet.
        unsafe {
            (*self.ring[index].get()).write(byte);
        }
        self.head.store(head.wrapping_add(1), Ordering::Release);
        Ok(())
    }

    /// Attempts to pop a byte. Returns `None` if the FIFO is empty.
    #[inline]
    pub fn try_pop(&self) -> Option<u8> {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);

        if tail == head {
            return None;
        }

        let index = tail & Self::MASK;
        // SAFETY: the slot was published by the producer's Release store above.
        let byte = unsafe { (*self.ring[index].get()).assume_init_read() };
        self.tail.store(tail.wrapping_add(1), Ordering::Release);
        Some(byte)
    }

    /// Same as [`Fifo::try_push`], but wrapped in a `critical-section`
    /// critical section for 8-bit hosts where a `usize` load/store is not
    /// itself atomic and interrupts must be disabled around the access.
    #[inline]
    pub fn try_push_locked(&self, byte: u8) -> Result<(), u8> {
        critical_section::with(|_| self.try_push(byte))
    }

    /// Locked counterpart to [`Fifo::try_pop`]; see [`Fifo::try_push_locked`].
    #[inline]
    pub fn try_pop_locked(&self) -> Option<u8> {
        critical_section::with(|_| self.try_pop())
    }

    /// Approximate number of buffered bytes (may be stale under concurrent access).
    #[inline]
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Relaxed);
        head.wrapping_sub(tail)
    }

    /// `true` if no bytes are buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if the buffer cannot accept another byte.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() >= N
    }

    /// Total capacity of the buffer.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for Fifo<N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
