//! Fixed-capacity circular storage used by the replay buffer implementations.
//!
//! The ring is a plain value: [`CircularBufferState::push`] consumes a state
//! and returns its successor. [`UniformReplay`](crate::UniformReplay) is a
//! thin sampling layer over this module.
use crate::{error::ReplayError, Item, ItemShape};
use anyhow::Result;
use log::trace;

/// Fixed-capacity circular storage with overwrite-on-full semantics.
///
/// All `capacity` slots are allocated at init and filled with copies of the
/// template item, so the storage footprint is fixed by the configuration and
/// never changes afterwards. The occupied count tracks how many slots hold
/// data that was actually pushed; the cursor wraps modulo the capacity, and
/// once the ring is full each push overwrites the least recently written
/// slot. There is no deletion: the occupied count never decreases.
#[derive(Clone, Debug, PartialEq)]
pub struct CircularBufferState<T> {
    slots: Vec<T>,
    cursor: usize,
    len: usize,
    shape: ItemShape,
}

impl<T: Item> CircularBufferState<T> {
    /// Creates an empty ring of `capacity` slots shaped like `template`.
    ///
    /// Fails with [`ReplayError::Configuration`] if `capacity` is zero.
    pub fn init(template: &T, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(
                ReplayError::Configuration("buffer capacity must be at least 1".into()).into(),
            );
        }
        trace!("allocating {} slots of shape {}", capacity, template.shape());
        Ok(Self {
            slots: vec![template.clone(); capacity],
            cursor: 0,
            len: 0,
            shape: template.shape(),
        })
    }

    /// Returns the successor state with `item` written at the cursor.
    ///
    /// Fails with [`ReplayError::ShapeMismatch`] if `item` does not have the
    /// shape established at init; the check runs before the state is touched.
    pub fn push(mut self, item: &T) -> Result<Self> {
        let shape = item.shape();
        if shape != self.shape {
            return Err(ReplayError::ShapeMismatch {
                expected: self.shape.clone(),
                found: shape,
            }
            .into());
        }
        self.slots[self.cursor] = item.clone();
        self.cursor = (self.cursor + 1) % self.slots.len();
        if self.len < self.slots.len() {
            self.len += 1;
        }
        Ok(self)
    }

    /// Returns the item in the `ix`-th occupied slot.
    ///
    /// Occupied slots are the first [`len`](Self::len) slots of the storage;
    /// callers must keep `ix < len`.
    #[inline]
    pub fn get(&self, ix: usize) -> &T {
        debug_assert!(ix < self.len);
        &self.slots[ix]
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` while no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` once every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Returns the item shape established at init.
    pub fn shape(&self) -> &ItemShape {
        &self.shape
    }

    /// Iterates over the occupied slots from the oldest to the newest item.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        // Until the ring wraps the oldest item sits in slot 0; afterwards it
        // sits at the cursor, which points at the next slot to overwrite.
        let start = if self.is_full() { self.cursor } else { 0 };
        (0..self.len).map(move |k| &self.slots[(start + k) % self.slots.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PaddedVec;

    #[test]
    fn init_creates_an_empty_ring() {
        let state = CircularBufferState::init(&0.0f32, 3).unwrap();
        assert_eq!(state.len(), 0);
        assert_eq!(state.capacity(), 3);
        assert_eq!(state.shape(), &ItemShape::scalar());
        assert!(state.is_empty());
        assert!(!state.is_full());
    }

    #[test]
    fn init_rejects_zero_capacity() {
        let err = CircularBufferState::init(&0.0f32, 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReplayError>(),
            Some(ReplayError::Configuration(_))
        ));
    }

    #[test]
    fn push_fills_slots_in_insertion_order() {
        let mut state = CircularBufferState::init(&0.0f32, 3).unwrap();
        for x in 1..=2 {
            state = state.push(&(x as f32)).unwrap();
        }
        assert_eq!(state.len(), 2);
        assert!(!state.is_full());
        let items: Vec<f32> = state.iter().copied().collect();
        assert_eq!(items, vec![1.0, 2.0]);
    }

    #[test]
    fn push_overwrites_the_oldest_slot_once_full() {
        let mut state = CircularBufferState::init(&0.0f32, 3).unwrap();
        for x in 1..=5 {
            state = state.push(&(x as f32)).unwrap();
        }
        assert_eq!(state.len(), 3);
        assert!(state.is_full());
        let items: Vec<f32> = state.iter().copied().collect();
        assert_eq!(items, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn push_rejects_a_mismatched_shape() {
        let template = PaddedVec::padded(&[0.0], 2).unwrap();
        let state = CircularBufferState::init(&template, 4).unwrap();
        let wide = PaddedVec::from(vec![1.0, 2.0, 3.0]);
        let err = state.push(&wide).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReplayError>(),
            Some(ReplayError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn a_cloned_push_leaves_the_predecessor_unchanged() {
        let state = CircularBufferState::init(&0.0f32, 2).unwrap();
        let next = state.clone().push(&7.0).unwrap();
        assert_eq!(state.len(), 0);
        assert_eq!(next.len(), 1);
        assert_ne!(state, next);
    }
}
