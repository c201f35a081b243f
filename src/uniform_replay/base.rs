//! The uniform replay buffer.
use super::UniformReplayConfig;
use crate::{circular_buffer::CircularBufferState, error::ReplayError, Item, ReplayBufferBase};
use anyhow::Result;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::marker::PhantomData;

/// State of a [`UniformReplay`] buffer.
///
/// The state is the ring storage itself; the buffer keeps no bookkeeping of
/// its own on top of it.
pub type UniformReplayState<T> = CircularBufferState<T>;

/// A replay buffer that samples stored items uniformly at random.
///
/// Items are kept in fixed-capacity circular storage: once the buffer is
/// full, adding evicts the oldest item. Batches are drawn with replacement,
/// so a batch may be larger than the number of stored items. All operations
/// are pure; the buffer value itself only carries the capacity, while the
/// stored items live in a [`UniformReplayState`] that is threaded through
/// [`add`](ReplayBufferBase::add) explicitly.
///
/// # Examples
///
/// ```rust
/// use flashback::{ReplayBufferBase, UniformReplay};
///
/// # fn main() -> anyhow::Result<()> {
/// let buffer = UniformReplay::new(3)?;
/// let mut state = buffer.init(&0.0f32)?;
/// for x in 0..5 {
///     state = buffer.add(state, &(x as f32))?;
/// }
/// assert_eq!(buffer.size(&state), 3);
///
/// let batch = buffer.sample(&state, 42, 8)?;
/// assert_eq!(batch.len(), 8);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct UniformReplay<T> {
    capacity: usize,
    phantom: PhantomData<T>,
}

impl<T: Item> UniformReplay<T> {
    /// Creates a buffer with the given storage capacity.
    ///
    /// Fails with [`ReplayError::Configuration`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(
                ReplayError::Configuration("buffer capacity must be at least 1".into()).into(),
            );
        }
        Ok(Self {
            capacity,
            phantom: PhantomData,
        })
    }

    /// Creates a buffer from a configuration.
    pub fn build(config: &UniformReplayConfig) -> Result<Self> {
        debug!("uniform replay buffer with capacity {}", config.capacity);
        Self::new(config.capacity)
    }

    /// Returns the storage capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Item> ReplayBufferBase for UniformReplay<T> {
    type Item = T;
    type State = UniformReplayState<T>;

    fn init(&self, template: &T) -> Result<Self::State> {
        CircularBufferState::init(template, self.capacity)
    }

    fn add(&self, state: Self::State, item: &T) -> Result<Self::State> {
        state.push(item)
    }

    fn sample(&self, state: &Self::State, seed: u64, batch_size: usize) -> Result<Vec<T>> {
        if state.is_empty() {
            return Err(ReplayError::EmptyBuffer.into());
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let batch = (0..batch_size)
            .map(|_| state.get(rng.gen_range(0..state.len())).clone())
            .collect();
        Ok(batch)
    }

    fn size(&self, state: &Self::State) -> usize {
        state.len()
    }
}
