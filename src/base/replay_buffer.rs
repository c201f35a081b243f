//! Replay buffer interface.
//!
//! This module defines the contract shared by every replay buffer in the
//! library. A buffer value is a stateless descriptor; the stored experience
//! lives in an explicit state value that each operation threads through,
//! returning the successor state instead of mutating anything in place.

use super::Item;
use anyhow::Result;

/// Interface of a replay buffer over explicit state values.
///
/// Implementors hold configuration only (capacity, cluster layout); all
/// stored experience lives in [`State`](Self::State) values created by
/// [`init`](Self::init) and threaded through [`add`](Self::add). Cloning a
/// state before an operation keeps the predecessor available; dropping a
/// state is the only teardown.
///
/// Because the whole capability set is this one trait, implementations
/// compose: a clustered buffer accepts any implementor as its child,
/// including another clustered buffer.
///
/// # Examples
///
/// ```
/// use flashback::{ReplayBufferBase, UniformReplay};
///
/// let buffer = UniformReplay::new(3).unwrap();
/// let mut state = buffer.init(&0.0f32).unwrap();
/// for x in 0..5 {
///     state = buffer.add(state, &(x as f32)).unwrap();
/// }
/// assert_eq!(buffer.size(&state), 3);
///
/// let batch = buffer.sample(&state, 42, 8).unwrap();
/// assert_eq!(batch.len(), 8);
/// ```
pub trait ReplayBufferBase {
    /// The type of items stored in the buffer.
    type Item: Item;

    /// The state value threaded through the operations.
    type State: Clone;

    /// Creates the initial, empty state.
    ///
    /// `template` fixes the item shape and the storage layout; its value is
    /// never returned by sampling. The shape of the created state depends
    /// only on the buffer configuration and the template shape.
    fn init(&self, template: &Self::Item) -> Result<Self::State>;

    /// Returns the successor of `state` with `item` added.
    ///
    /// The failure modes are implementation preconditions, such as an item
    /// shape disagreeing with the template or a misbehaving clustering
    /// function; a full buffer is not a failure.
    fn add(&self, state: Self::State, item: &Self::Item) -> Result<Self::State>;

    /// Draws `batch_size` items from the occupied slots of `state`.
    ///
    /// All randomness derives from `seed`: identical state and seed produce
    /// the identical sequence. The output length is exactly `batch_size`
    /// regardless of occupancy; sampling a buffer with zero occupancy fails
    /// with [`ReplayError::EmptyBuffer`](crate::error::ReplayError::EmptyBuffer).
    fn sample(
        &self,
        state: &Self::State,
        seed: u64,
        batch_size: usize,
    ) -> Result<Vec<Self::Item>>;

    /// Returns the number of occupied slots in `state`.
    fn size(&self, state: &Self::State) -> usize;

    /// Folds [`add`](Self::add) over `items`, threading the state through.
    fn add_batch(&self, state: Self::State, items: &[Self::Item]) -> Result<Self::State> {
        let mut state = state;
        for item in items {
            state = self.add(state, item)?;
        }
        Ok(state)
    }
}
