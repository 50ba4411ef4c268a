//! Fixed-capacity entity pools
//!
//! Slots are allocated once and never grow. A spawn takes the first inactive
//! slot and overwrites it whole; when every slot is live the spawn is dropped.

/// An entity that can live in a [`Pool`] slot
pub trait Slot: Clone + Default {
    fn is_active(&self) -> bool;
    fn deactivate(&mut self);
}

/// Arena of `capacity` slots, pre-filled with inactive placeholders
#[derive(Debug, Clone)]
pub struct Pool<T: Slot> {
    slots: Box<[T]>,
}

impl<T: Slot> Pool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![T::default(); capacity].into_boxed_slice(),
        }
    }

    /// Number of slots (fixed for the pool's lifetime)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Place `entity` in the first free slot, returning its index.
    /// Returns `None` (and drops the entity) when the pool is full.
    pub fn spawn(&mut self, entity: T) -> Option<usize> {
        let index = self.slots.iter().position(|slot| !slot.is_active())?;
        self.slots[index] = entity;
        Some(index)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_active()).count()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|slot| slot.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter(|slot| slot.is_active())
    }

    /// Raw slot access, inactive slots included
    pub fn slots_mut(&mut self) -> &mut [T] {
        &mut self.slots
    }

    /// Deactivate every slot in place
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.deactivate();
        }
    }

    /// Clone the live entities out for rendering
    pub fn collect_active(&self) -> Vec<T> {
        self.iter_active().cloned().collect()
    }
}
