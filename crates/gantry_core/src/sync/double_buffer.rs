//! # Double-Buffered Snapshot
//!
//! Single-writer / many-reader handoff between the update and render threads.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌─────────────────────────────┐
//!                    │        DoubleBuffer<T>      │
//!                    │                             │
//!                    │  ┌─────────┐  ┌─────────┐  │
//!                    │  │  Back   │  │  Front  │  │
//!                    │  │ (Mutex) │  │(Arc<T>) │  │
//!                    │  └────┬────┘  └────┬────┘  │
//!                    │       │            │       │
//!                    │  ┌────┴────────────┴────┐  │
//!                    │  │   Dirty flag (atomic) │  │
//!                    │  └──────────────────────┘  │
//!                    └─────────────────────────────┘
//!                              │
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//!      ┌──────────────┐                 ┌────────────┐
//!      │ WriteHandle  │                 │ ReadHandle │
//!      │  (Update)    │                 │  (Render)  │
//!      └──────────────┘                 └────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! - `WriteHandle`: Exclusive access to the back buffer (one at a time)
//! - `ReadHandle`: Shared, immutable snapshot of the front buffer (many allowed)
//! - `swap_buffers`: Publishes the back buffer if it was written since the
//!   last swap. The lock is only held long enough to check the flag and swap
//!   the snapshot pointer.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard, RwLock};

/// Double-buffered value for lock-free reads of the last published frame.
///
/// ## Usage
///
/// ```rust
/// use gantry_core::DoubleBuffer;
///
/// let frames = DoubleBuffer::new(Vec::<u32>::new());
///
/// // Update thread
/// frames.write_handle().push(7);
/// assert!(frames.swap_buffers());
///
/// // Render thread
/// let frame = frames.read_handle();
/// assert_eq!(frame.as_slice(), &[7]);
/// ```
pub struct DoubleBuffer<T> {
    /// Buffer being written by the update thread.
    back: Mutex<T>,

    /// Last published snapshot.
    front: RwLock<Arc<T>>,

    /// Whether the back buffer was written since the last swap.
    dirty: AtomicBool,

    /// Number of swaps that published a new snapshot.
    frame_count: AtomicUsize,
}

impl<T: Clone> DoubleBuffer<T> {
    /// Creates a double buffer whose front and back both hold `initial`.
    #[must_use]
    pub fn new(initial: T) -> Arc<Self> {
        Arc::new(Self {
            front: RwLock::new(Arc::new(initial.clone())),
            back: Mutex::new(initial),
            dirty: AtomicBool::new(false),
            frame_count: AtomicUsize::new(0),
        })
    }

    /// Returns the number of published frames.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frame_count.load(Ordering::Relaxed)
    }

    /// Returns whether the back buffer has unpublished writes.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Returns whether a write handle is currently active.
    #[inline]
    #[must_use]
    pub fn is_write_locked(&self) -> bool {
        self.back.is_locked()
    }

    /// Returns the number of read handles still holding the current snapshot.
    #[must_use]
    pub fn read_handle_count(&self) -> usize {
        Arc::strong_count(&*self.front.read()) - 1
    }

    /// Gets a write handle for the update thread.
    ///
    /// Mutable access through the handle marks the buffer dirty.
    ///
    /// # Panics
    ///
    /// Panics if a write handle is already held (only one allowed).
    #[must_use]
    pub fn write_handle(&self) -> WriteHandle<'_, T> {
        let guard = self
            .back
            .try_lock()
            .expect("Double write handle! Only one write handle allowed at a time.");

        WriteHandle {
            guard,
            dirty: &self.dirty,
        }
    }

    /// Gets a read handle on the last published snapshot.
    ///
    /// The snapshot stays alive (and unchanged) for as long as the handle is
    /// held, even across later swaps.
    #[must_use]
    pub fn read_handle(&self) -> ReadHandle<T> {
        ReadHandle {
            snapshot: Arc::clone(&*self.front.read()),
        }
    }

    /// Publishes the back buffer if it was written since the last swap.
    ///
    /// Returns `true` if a new snapshot was published.
    ///
    /// # Panics
    ///
    /// Panics if a write handle is still active.
    pub fn swap_buffers(&self) -> bool {
        let back = self
            .back
            .try_lock()
            .expect("Cannot swap buffers while write handle is active!");

        if !self.dirty.swap(false, Ordering::AcqRel) {
            return false;
        }

        let snapshot = Arc::new((*back).clone());
        drop(back);

        *self.front.write() = snapshot;
        self.frame_count.fetch_add(1, Ordering::Relaxed);
        true
    }
}

/// Write handle for the update thread.
///
/// Provides exclusive mutable access to the back buffer.
pub struct WriteHandle<'a, T> {
    guard: MutexGuard<'a, T>,
    dirty: &'a AtomicBool,
}

impl<T> WriteHandle<'_, T> {
    /// Marks the buffer dirty without touching it (forces the next swap).
    pub fn touch(&self) {
        self.dirty.store(true, Ordering::Release);
    }
}

impl<T> Deref for WriteHandle<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<T> DerefMut for WriteHandle<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.dirty.store(true, Ordering::Release);
        &mut self.guard
    }
}

/// Read handle for the render thread.
///
/// An immutable snapshot of one published frame.
pub struct ReadHandle<T> {
    snapshot: Arc<T>,
}

impl<T> ReadHandle<T> {
    /// Returns true if both handles observe the same published frame.
    #[must_use]
    pub fn same_frame(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.snapshot, &other.snapshot)
    }
}

impl<T> Deref for ReadHandle<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.snapshot
    }
}
