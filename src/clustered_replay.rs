//! Clustered experience replay built on top of other replay buffers.
//!
//! A clustered buffer owns a set of child buffers and routes every added
//! item to one of them with a user-provided clustering function. Sampling
//! first picks a non-empty cluster from a weighted distribution, then draws
//! from the chosen child buffer. Because the children are ordinary
//! [`ReplayBufferBase`](crate::ReplayBufferBase) implementations, clustered
//! buffers nest: a cluster can itself be a clustered buffer.
//!
//! # Key Components
//!
//! - [`ClusteredReplay`]: the buffer, generic over its child buffer and
//!   clustering function
//! - [`ClusteredReplayState`]: the threaded state, one child state per
//!   cluster
//! - [`ClusterWeighting`]: occupancy-proportional or balanced cluster
//!   selection
//! - [`ClusteredReplayConfig`]: serializable configuration
//!
//! # Examples
//!
//! ```rust
//! use flashback::{ClusteredReplay, ReplayBufferBase, UniformReplay};
//!
//! # fn main() -> anyhow::Result<()> {
//! // Keep rewarding and unrewarding transitions in separate clusters so
//! // that rare rewards are not crowded out of the buffer.
//! let buffer = ClusteredReplay::new(
//!     2,
//!     UniformReplay::new(1000)?,
//!     |reward: &f32| (*reward > 0.0) as usize,
//! )?;
//!
//! let state = buffer.init(&0.0f32)?;
//! let state = buffer.add(state, &1.0)?;
//! assert_eq!(buffer.occupancies(&state), vec![0, 1]);
//! # Ok(())
//! # }
//! ```

mod base;
mod config;
pub use base::{ClusterWeighting, ClusteredReplay, ClusteredReplayState};
pub use config::ClusteredReplayConfig;
