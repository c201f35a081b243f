//! Uniform experience replay over fixed-capacity circular storage.
//!
//! This module provides the simplest replay buffer of the crate: items are
//! stored in insertion order, the oldest item is evicted once the capacity
//! is reached, and batches are drawn uniformly at random with replacement.
//!
//! # Key Components
//!
//! - [`UniformReplay`]: the buffer, implementing [`ReplayBufferBase`](crate::ReplayBufferBase)
//! - [`UniformReplayState`]: the threaded state, a ring of items
//! - [`UniformReplayConfig`]: serializable configuration
//!
//! # Examples
//!
//! ```rust
//! use flashback::{ReplayBufferBase, UniformReplay, UniformReplayConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = UniformReplayConfig::default().capacity(100);
//! let buffer = UniformReplay::build(&config)?;
//!
//! let state = buffer.init(&0.0f32)?;
//! let state = buffer.add(state, &1.0)?;
//! assert_eq!(buffer.size(&state), 1);
//! # Ok(())
//! # }
//! ```

mod base;
mod config;
pub use base::{UniformReplay, UniformReplayState};
pub use config::UniformReplayConfig;
