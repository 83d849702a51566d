/// Fixed-capacity slot arena shared by every unit pool.
///
/// Slots are never resized.  Allocation is a linear scan for the first
/// inactive slot, freeing is clearing the slot's `active` flag, and a full
/// pool simply refuses the request.

/// Number of slots in every pool.
pub const POOL_CAPACITY: usize = 10;

/// A pool entry that can be switched on and off.
pub trait Slot: Copy + Default {
    fn is_active(&self) -> bool;
    fn deactivate(&mut self);
}

#[derive(Clone, Debug)]
pub struct Pool<T: Slot, const N: usize = POOL_CAPACITY> {
    slots: [T; N],
}

impl<T: Slot, const N: usize> Default for Pool<T, N> {
    fn default() -> Self {
        Self {
            slots: [T::default(); N],
        }
    }
}

impl<T: Slot, const N: usize> Pool<T, N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> usize {
        N
    }

    /// Index of the first inactive slot, if any.
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|s| !s.is_active())
    }

    /// Overwrite the first inactive slot with `unit`.  Returns the slot index,
    /// or `None` when every slot is taken (the unit is dropped).
    pub fn insert(&mut self, unit: T) -> Option<usize> {
        let index = self.first_free()?;
        self.slots[index] = unit;
        Some(index)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Every slot, active or not, in index order.
    pub fn slots(&self) -> &[T; N] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [T; N] {
        &mut self.slots
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|s| s.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    pub fn is_full(&self) -> bool {
        self.first_free().is_none()
    }

    pub fn clear(&mut self) {
        self.slots = [T::default(); N];
    }
}
