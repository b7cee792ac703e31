//! # Slot Pool
//!
//! Growable slot storage addressed by generational [`Handle`]s.

use crate::handle::Handle;

/// A single storage slot.
#[derive(Debug, Clone)]
struct Slot<T> {
    /// Generation of the value currently (or next) stored here.
    generation: u32,
    /// The stored value, `None` when the slot is free.
    value: Option<T>,
}

/// A pool of objects addressed by generational handles.
///
/// Freed slots are recycled through a free list. Every free bumps the slot's
/// generation, so handles to a freed object never resolve to whatever is
/// stored in the slot later.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Use one pool per thread or wrap in a mutex.
///
/// # Example
///
/// ```rust
/// use gantry_core::Pool;
///
/// let mut pool: Pool<u32> = Pool::with_capacity(64);
///
/// let handle = pool.insert(42);
/// assert_eq!(pool.get(handle), Some(&42));
///
/// assert_eq!(pool.remove(handle), Some(42));
/// assert!(!pool.contains(handle));
/// ```
#[derive(Debug, Clone)]
pub struct Pool<T> {
    /// The storage array.
    slots: Vec<Slot<T>>,
    /// Free list - indices of available slots.
    free_list: Vec<u32>,
    /// Number of live objects.
    len: usize,
}

impl<T> Pool<T> {
    /// Creates an empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty pool with room for `capacity` objects before growing.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Returns the number of live objects.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the pool holds no live objects.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots (live and free).
    #[inline]
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Stores a value and returns its handle.
    ///
    /// Reuses a free slot when one exists, otherwise grows the storage.
    ///
    /// # Panics
    ///
    /// Panics if the pool would exceed `u32::MAX` slots.
    pub fn insert(&mut self, value: T) -> Handle {
        self.len += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return Handle::new(index, slot.generation);
        }

        let index = u32::try_from(self.slots.len()).expect("pool exceeded u32::MAX slots");
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        Handle::new(index, 0)
    }

    /// Frees a live object.
    ///
    /// # Returns
    ///
    /// The freed object, or None if the handle was stale or null.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot = self.live_slot_mut(handle)?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);

        self.free_list.push(handle.index());
        self.len -= 1;

        Some(value)
    }

    /// Returns true if the handle refers to a live object.
    #[inline]
    #[must_use]
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Gets a reference to a live object.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        if handle.is_null() {
            return None;
        }
        let slot = self.slots.get(handle.index() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    /// Gets a mutable reference to a live object.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.live_slot_mut(handle)?.value.as_mut()
    }

    /// Frees every object. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            // Slot count never exceeds u32::MAX (checked in `insert`).
            #[allow(clippy::cast_possible_truncation)]
            self.free_list.push(index as u32);
        }
        self.len = 0;
    }

    /// Iterates over all live objects in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            #[allow(clippy::cast_possible_truncation)]
            let handle = Handle::new(index as u32, slot.generation);
            slot.value.as_ref().map(|value| (handle, value))
        })
    }

    /// Iterates mutably over all live objects in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            #[allow(clippy::cast_possible_truncation)]
            let handle = Handle::new(index as u32, slot.generation);
            slot.value.as_mut().map(|value| (handle, value))
        })
    }

    /// Returns the slot for `handle` if its generation still matches.
    fn live_slot_mut(&mut self, handle: Handle) -> Option<&mut Slot<T>> {
        if handle.is_null() {
            return None;
        }
        let slot = self.slots.get_mut(handle.index() as usize)?;
        (slot.generation == handle.generation()).then_some(slot)
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_insert_remove() {
        let mut pool: Pool<u32> = Pool::with_capacity(10);

        let h1 = pool.insert(42);
        assert_eq!(*pool.get(h1).unwrap(), 42);
        assert_eq!(pool.len(), 1);

        let freed = pool.remove(h1).unwrap();
        assert_eq!(freed, 42);
        assert_eq!(pool.len(), 0);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_pool_reuse_bumps_generation() {
        let mut pool: Pool<u32> = Pool::new();

        let h1 = pool.insert(1);
        pool.remove(h1);

        let h2 = pool.insert(2);
        assert_eq!(h1.index(), h2.index()); // Same slot reused
        assert_ne!(h1.generation(), h2.generation());
        assert!(pool.get(h1).is_none());
        assert_eq!(*pool.get(h2).unwrap(), 2);
        assert_eq!(pool.slot_count(), 1);
    }

    #[test]
    fn test_pool_double_remove() {
        let mut pool: Pool<&str> = Pool::new();

        let h = pool.insert("a");
        assert_eq!(pool.remove(h), Some("a"));
        assert_eq!(pool.remove(h), None);
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn test_pool_null_handle() {
        let mut pool: Pool<u8> = Pool::new();
        let _ = pool.insert(7);

        assert!(pool.get(Handle::NULL).is_none());
        assert!(pool.get_mut(Handle::NULL).is_none());
        assert!(pool.remove(Handle::NULL).is_none());
    }

    #[test]
    fn test_pool_clear_invalidates() {
        let mut pool: Pool<u8> = Pool::new();
        let a = pool.insert(1);
        let b = pool.insert(2);

        pool.clear();
        assert!(pool.is_empty());
        assert!(!pool.contains(a));
        assert!(!pool.contains(b));

        // Lowest slot is handed out first after a clear.
        let c = pool.insert(3);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_pool_iter_skips_free_slots() {
        let mut pool: Pool<u32> = Pool::new();
        let a = pool.insert(10);
        let b = pool.insert(20);
        let c = pool.insert(30);
        pool.remove(b);

        let live: Vec<_> = pool.iter().collect();
        assert_eq!(live, vec![(a, &10), (c, &30)]);

        for (_, value) in pool.iter_mut() {
            *value += 1;
        }
        assert_eq!(pool.get(c), Some(&31));
    }
}
