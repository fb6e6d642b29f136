//! Fixed-capacity circular buffer keeping the most recent items

use crate::error::{StreamError, StreamResult};

/// A ring of `capacity` slots that overwrites its oldest entry on overflow.
///
/// `Ring` is not synchronized; the owner serializes access (`add` takes
/// `&mut self`). Contents are always produced oldest first.
#[derive(Debug, Clone)]
pub struct Ring<T> {
    slots: Vec<Option<T>>,
    cursor: usize,
    len: usize,
}

impl<T> Ring<T> {
    /// Create a ring holding at most `capacity` items
    pub fn new(capacity: usize) -> StreamResult<Self> {
        if capacity < 1 {
            return Err(StreamError::invalid_argument("n must be greater than 0"));
        }

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots,
            cursor: 0,
            len: 0,
        })
    }

    /// Store an item, evicting the oldest one once the ring is full
    pub fn add(&mut self, item: T) {
        let capacity = self.slots.len();
        self.slots[self.cursor] = Some(item);
        self.cursor = (self.cursor + 1) % capacity;
        if self.len < capacity {
            self.len += 1;
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copy out the valid items, oldest first, leaving the ring untouched
    pub fn take(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.order().filter_map(|idx| self.slots[idx].clone()).collect()
    }

    /// Consume the ring, yielding the valid items oldest first
    pub fn into_vec(mut self) -> Vec<T> {
        let order: Vec<usize> = self.order().collect();
        order
            .into_iter()
            .filter_map(|idx| self.slots[idx].take())
            .collect()
    }

    // Slot indices of the valid items in arrival order. Before the first
    // wrap the oldest item sits at 0, afterwards it sits under the cursor.
    fn order(&self) -> impl Iterator<Item = usize> {
        let capacity = self.slots.len();
        let start = if self.len < capacity { 0 } else { self.cursor };
        (0..self.len).map(move |offset| (start + offset) % capacity)
    }
}
