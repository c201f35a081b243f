#![warn(missing_docs)]
//! A library of composable experience replay buffers for reinforcement learning.
//!
//! Buffers are plain values and their operations are pure: adding items and
//! sampling batches never mutate a buffer in place. The stored items live in
//! an explicit state value threaded through the operations, and sampling is
//! driven by explicit integer seeds, so every result can be reproduced. See
//! [`ReplayBufferBase`] for the contract, and [`UniformReplay`] and
//! [`ClusteredReplay`] for the buffers built on it.
pub mod circular_buffer;
pub mod clustered_replay;
pub mod error;
pub mod uniform_replay;

mod base;
pub use base::{Item, ItemShape, PaddedVec, ReplayBufferBase};

pub use circular_buffer::CircularBufferState;
pub use clustered_replay::{
    ClusterWeighting, ClusteredReplay, ClusteredReplayConfig, ClusteredReplayState,
};
pub use uniform_replay::{UniformReplay, UniformReplayConfig, UniformReplayState};
